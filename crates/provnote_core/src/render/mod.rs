//! Rendering adapter inputs.
//!
//! # Responsibility
//! - Split highlight chunks into paragraph-sized runs for display.
//! - Project parsed blocks into flat display views.
//!
//! # Invariants
//! - Joining each paragraph's run texts, then joining paragraphs with the
//!   paragraph separator, reproduces the chunked base text.
//! - No styling or layout decisions beyond the bucket color lookup.

use crate::highlight::bucket::{classify_score, BucketId};
use crate::model::block::{ContentBlock, ContentBlockType, MetadataKey};
use crate::model::span::Chunk;
use crate::text::paragraph_ranges;
use serde::Serialize;

/// Contiguous piece of one paragraph carrying a single highlight state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    pub text: String,
    /// Bucket for highlighted runs, `None` for plain text.
    pub highlight: Option<BucketId>,
    /// Ordinal of the span the run came from.
    pub ordinal: Option<usize>,
}

/// One displayed paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paragraph {
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Whether any run in the paragraph is highlighted.
    pub fn has_highlight(&self) -> bool {
        self.runs.iter().any(|run| run.highlight.is_some())
    }
}

/// Splits chunks into paragraphs, preserving which pieces are highlighted.
///
/// Separators are located in the concatenated chunk text, so a separator
/// split across two chunks still opens a new paragraph. Separator characters
/// and empty pieces are not emitted as runs.
pub fn paragraph_runs(chunks: &[Chunk], dark_mode: bool) -> Vec<Paragraph> {
    let text: String = chunks.iter().map(|chunk| chunk.text.as_str()).collect();
    let ranges = paragraph_ranges(&text);
    let mut paragraphs = vec![Paragraph::default(); ranges.len()];

    let mut paragraph = 0usize;
    let mut chunk_start = 0usize;
    for chunk in chunks {
        let chunk_end = chunk_start + chunk.text.len();
        let highlight = chunk
            .highlighted
            .then(|| classify_score(chunk.score, dark_mode));
        while let Some(&(range_start, range_end)) = ranges.get(paragraph) {
            let from = range_start.max(chunk_start);
            let to = range_end.min(chunk_end);
            if from < to {
                if let Some(piece) = text.get(from..to) {
                    paragraphs[paragraph].runs.push(Run {
                        text: piece.to_string(),
                        highlight,
                        ordinal: chunk.ordinal,
                    });
                }
            }
            if range_end > chunk_end {
                break;
            }
            paragraph += 1;
        }
        chunk_start = chunk_end;
    }
    paragraphs
}

/// Flat display projection of one parsed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockView {
    pub kind: ContentBlockType,
    /// Title for sources, model for AI content, filename for images.
    pub heading: Option<String>,
    pub date: Option<String>,
    pub body: String,
    pub image_id: Option<String>,
}

/// Builds display views for parsed blocks.
pub fn block_views(blocks: &[ContentBlock]) -> Vec<BlockView> {
    blocks.iter().map(block_view).collect()
}

fn block_view(block: &ContentBlock) -> BlockView {
    let metadata = |key: MetadataKey| block.metadata.get(key).map(str::to_string);
    let heading = match block.kind {
        ContentBlockType::Source => metadata(MetadataKey::Title),
        ContentBlockType::Ai => metadata(MetadataKey::Model),
        ContentBlockType::User => Some("Note".to_string()),
        ContentBlockType::Image => block.image_filename.clone(),
        ContentBlockType::Default => None,
    };
    BlockView {
        kind: block.kind,
        heading,
        date: metadata(MetadataKey::Date),
        body: block.body_text(),
        image_id: block.image_id.clone(),
    }
}
