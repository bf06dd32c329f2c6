//! Domain model for tagged note blocks and scored highlight spans.
//!
//! # Responsibility
//! - Define the block shapes produced by the markup parser.
//! - Define span input and chunk output shapes of the highlight engine.
//!
//! # Invariants
//! - Blocks and chunks are transient: recomputed per call, never cached.
//! - Span and chunk offsets count chars, not bytes.

pub mod block;
pub mod span;
