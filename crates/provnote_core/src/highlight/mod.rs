//! Highlight segment engine.
//!
//! # Responsibility
//! - Partition a base text into highlighted/unhighlighted chunks.
//! - Map span scores to fixed visual intensity buckets.
//!
//! # Invariants
//! - Concatenated chunk texts reproduce the base text exactly.
//! - Invalid or overlapping spans fail the call; nothing is silently clipped.

pub mod bucket;
pub mod chunks;

pub use bucket::{classify_score, score_bucket, BucketId, Palette, ScoreBucket, BUCKET_THRESHOLDS};
pub use chunks::{build_chunks, build_chunks_with, clip_overlaps, InvalidSpanError};
