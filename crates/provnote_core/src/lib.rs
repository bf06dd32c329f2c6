//! Core annotation logic for provnote.
//! This crate owns the note markup grammar and highlight partitioning rules.

pub mod clock;
pub mod config;
pub mod editor;
pub mod highlight;
pub mod logging;
pub mod markup;
pub mod model;
pub mod render;
pub mod service;
pub mod text;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EngineConfig, HighlightOptions, MarkupConfig};
pub use editor::{EditorError, InsertAt, InsertCapability, NoteBuffer};
pub use highlight::{
    build_chunks, build_chunks_with, classify_score, clip_overlaps, BucketId, InvalidSpanError,
    Palette, ScoreBucket,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use markup::{format, format_image_ref, parse, Formatter};
pub use model::block::{BlockMetadata, ContentBlock, ContentBlockType, MetadataKey};
pub use model::span::{Chunk, ScoredSpan};
pub use render::{block_views, paragraph_runs, BlockView, Paragraph, Run};
pub use service::annotation_service::{AnnotationService, InsertedImage};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
