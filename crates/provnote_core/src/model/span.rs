//! Highlight span input and chunk output shapes.

use serde::{Deserialize, Serialize};

/// Relevance-scored char range over a base document.
///
/// Supplied by an external scoring collaborator; neither sorted nor
/// validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredSpan {
    /// Inclusive start char offset.
    pub start: usize,
    /// Exclusive end char offset.
    pub end: usize,
    /// Relevance score in `[0, 1]`.
    pub score: f64,
}

impl ScoredSpan {
    pub fn new(start: usize, end: usize, score: f64) -> Self {
        Self { start, end, score }
    }

    /// Length in chars, zero for reversed spans.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One contiguous run of a partitioned base text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub highlighted: bool,
    /// Span score, `0.0` for unhighlighted runs.
    pub score: f64,
    /// Index into the sorted span list; `None` for unhighlighted runs.
    pub ordinal: Option<usize>,
    /// Char offset of the run in the base text.
    pub start: usize,
    /// Exclusive end char offset of the run in the base text.
    pub end: usize,
}

impl Chunk {
    pub(crate) fn plain(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            highlighted: false,
            score: 0.0,
            ordinal: None,
            start,
            end,
        }
    }

    pub(crate) fn highlighted(
        text: impl Into<String>,
        span: &ScoredSpan,
        ordinal: usize,
    ) -> Self {
        Self {
            text: text.into(),
            highlighted: true,
            score: span.score,
            ordinal: Some(ordinal),
            start: span.start,
            end: span.end,
        }
    }
}
