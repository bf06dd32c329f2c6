//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose markup and highlight use-cases to Dart via FRB.
//! - Flatten core types into plain string/number envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported inside envelopes, never thrown.

use log::warn;
use provnote_core::{
    build_chunks_with, classify_score, core_version as core_version_inner,
    format_image_ref as format_image_ref_inner, init_logging as init_logging_inner,
    parse as parse_inner, ping as ping_inner, ContentBlock, ContentBlockType, Formatter,
    HighlightOptions, MarkupConfig, ScoredSpan,
};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Insertion string envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatResponse {
    pub ok: bool,
    /// Text to splice into the editor buffer; empty on failure.
    pub text: String,
    pub message: String,
}

/// Formats one block for insertion.
///
/// Input semantics:
/// - `kind`: `source|ai|user|default|image`.
/// - `timestamp_format`: optional strftime pattern; blank means default.
#[flutter_rust_bridge::frb(sync)]
pub fn format_block(
    body: String,
    label: String,
    kind: String,
    timestamp_format: Option<String>,
) -> FormatResponse {
    let Some(kind) = ContentBlockType::parse(kind.as_str()) else {
        return FormatResponse {
            ok: false,
            text: String::new(),
            message: format!("unsupported block kind `{}`", kind.trim()),
        };
    };
    let config = MarkupConfig {
        timestamp_format: timestamp_format.unwrap_or_default(),
    };
    FormatResponse {
        ok: true,
        text: Formatter::with_config(config).format(&body, &label, kind),
        message: "ok".to_string(),
    }
}

/// Builds a standalone image reference line.
#[flutter_rust_bridge::frb(sync)]
pub fn format_image_ref(image_id: String, filename: String) -> String {
    format_image_ref_inner(&image_id, &filename)
}

/// Metadata pair in buffer order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiMetadataEntry {
    pub key: String,
    pub value: String,
}

/// Parsed block flattened for Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiContentBlock {
    /// `source|ai|user|image|default`.
    pub kind: String,
    pub metadata: Vec<FfiMetadataEntry>,
    pub body: Vec<String>,
    pub image_id: Option<String>,
    pub image_filename: Option<String>,
}

impl From<ContentBlock> for FfiContentBlock {
    fn from(block: ContentBlock) -> Self {
        Self {
            kind: block.kind.as_str().to_string(),
            metadata: block
                .metadata
                .iter()
                .map(|entry| FfiMetadataEntry {
                    key: entry.key.as_str().to_string(),
                    value: entry.value.clone(),
                })
                .collect(),
            body: block.body,
            image_id: block.image_id,
            image_filename: block.image_filename,
        }
    }
}

/// Parses a note buffer into blocks.
///
/// # FFI contract
/// - Never fails; malformed markup degrades to best-effort blocks.
#[flutter_rust_bridge::frb(sync)]
pub fn parse_note(buffer: String) -> Vec<FfiContentBlock> {
    parse_inner(&buffer)
        .into_iter()
        .map(FfiContentBlock::from)
        .collect()
}

/// Scored span input from the relevance collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FfiScoredSpan {
    /// Char offset; negative values are rejected.
    pub start: i64,
    pub end: i64,
    pub score: f64,
}

/// One rendered chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct FfiChunk {
    pub text: String,
    pub highlighted: bool,
    pub score: f64,
    /// Sorted span index, `-1` for unhighlighted chunks.
    pub ordinal: i64,
    /// Bucket level `0..=4`, `-1` for unhighlighted chunks.
    pub bucket: i32,
    /// CSS color for highlighted chunks, empty otherwise.
    pub color: String,
}

/// Chunk list envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkResponse {
    pub ok: bool,
    pub chunks: Vec<FfiChunk>,
    pub message: String,
}

impl ChunkResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            chunks: Vec::new(),
            message: message.into(),
        }
    }
}

/// Partitions `text` against scored spans for highlight rendering.
///
/// # FFI contract
/// - Sync call, CPU-only.
/// - Invalid or overlapping spans return `ok=false` with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn build_highlight_chunks(
    text: String,
    spans: Vec<FfiScoredSpan>,
    enabled: bool,
    dark_mode: bool,
) -> ChunkResponse {
    let mut core_spans = Vec::with_capacity(spans.len());
    for (index, span) in spans.iter().enumerate() {
        let (Ok(start), Ok(end)) = (usize::try_from(span.start), usize::try_from(span.end)) else {
            warn!("event=ffi_chunks module=ffi status=rejected reason=negative_offset");
            return ChunkResponse::failure(format!(
                "span #{index} has a negative offset ({}, {})",
                span.start, span.end
            ));
        };
        core_spans.push(ScoredSpan::new(start, end, span.score));
    }

    let options = HighlightOptions { enabled, dark_mode };
    match build_chunks_with(&text, &core_spans, &options) {
        Ok(chunks) => ChunkResponse {
            ok: true,
            chunks: chunks
                .into_iter()
                .map(|chunk| {
                    let bucket = chunk
                        .highlighted
                        .then(|| classify_score(chunk.score, dark_mode));
                    FfiChunk {
                        highlighted: chunk.highlighted,
                        score: chunk.score,
                        ordinal: chunk
                            .ordinal
                            .and_then(|ordinal| i64::try_from(ordinal).ok())
                            .unwrap_or(-1),
                        bucket: bucket.map_or(-1, |id| i32::from(id.bucket.level())),
                        color: bucket.map(|id| id.color().to_string()).unwrap_or_default(),
                        text: chunk.text,
                    }
                })
                .collect(),
            message: "ok".to_string(),
        },
        Err(err) => ChunkResponse::failure(err.to_string()),
    }
}
