//! Block markup engine.
//!
//! # Responsibility
//! - Serialize structured note content into tagged text (`Formatter`).
//! - Parse a tagged note buffer back into ordered blocks (`parse`).
//!
//! # Invariants
//! - Blocks never nest; the parser keeps at most one open block.
//! - Parsing never fails; malformed markup degrades to best-effort blocks.
//! - Emitted tag lines are bit-exact with existing saved buffers.

pub mod formatter;
pub mod grammar;
pub mod parser;

pub use formatter::{format, format_image_ref, Formatter};
pub use parser::parse;
