//! Span partitioning.
//!
//! # Invariants
//! - Spans are walked in stable `start` order; ordinals index that order.
//! - Every non-empty gap yields exactly one unhighlighted chunk.
//! - Span bounds are checked in chars before any slicing happens.

use crate::config::HighlightOptions;
use crate::model::span::{Chunk, ScoredSpan};
use crate::text::{check_bounds, BoundsError, CharOffsets};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected span input. `index` is the span's position in the caller's list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidSpanError {
    /// `end` is past the end of the text.
    OutOfBounds {
        index: usize,
        start: usize,
        end: usize,
        len: usize,
    },
    /// `start` is greater than `end`.
    Reversed {
        index: usize,
        start: usize,
        end: usize,
    },
    /// Span starts before the previous span in sort order has ended.
    Overlapping {
        index: usize,
        start: usize,
        previous_end: usize,
    },
    /// Score is NaN, infinite or outside `[0, 1]`.
    InvalidScore { index: usize, score: f64 },
}

impl Display for InvalidSpanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds {
                index,
                start,
                end,
                len,
            } => write!(
                f,
                "span #{index} [{start}, {end}) exceeds text length ({len})"
            ),
            Self::Reversed { index, start, end } => {
                write!(f, "span #{index} start ({start}) must be <= end ({end})")
            }
            Self::Overlapping {
                index,
                start,
                previous_end,
            } => write!(
                f,
                "span #{index} starts at {start} before previous span ends at {previous_end}"
            ),
            Self::InvalidScore { index, score } => {
                write!(f, "span #{index} score ({score}) must be within [0, 1]")
            }
        }
    }
}

impl Error for InvalidSpanError {}

impl InvalidSpanError {
    fn from_bounds(index: usize, span: &ScoredSpan, err: BoundsError) -> Self {
        match err {
            BoundsError::Reversed { start, end } => Self::Reversed { index, start, end },
            BoundsError::OutOfBounds { end, len } => Self::OutOfBounds {
                index,
                start: span.start,
                end,
                len,
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "out_of_bounds",
            Self::Reversed { .. } => "reversed",
            Self::Overlapping { .. } => "overlapping",
            Self::InvalidScore { .. } => "invalid_score",
        }
    }
}

/// Partitions `text` against `spans` with highlighting enabled.
pub fn build_chunks(text: &str, spans: &[ScoredSpan]) -> Result<Vec<Chunk>, InvalidSpanError> {
    build_chunks_with(text, spans, &HighlightOptions::default())
}

/// Partitions `text` into an ordered, gapless list of chunks.
///
/// Returns one unhighlighted chunk for the whole text when `spans` is empty
/// or highlighting is disabled.
///
/// # Errors
/// - [`InvalidSpanError::Reversed`] / [`InvalidSpanError::OutOfBounds`] for
///   spans outside `0 <= start <= end <= len(text)`.
/// - [`InvalidSpanError::InvalidScore`] for scores outside `[0, 1]`.
/// - [`InvalidSpanError::Overlapping`] when sorted spans overlap; see
///   [`clip_overlaps`] for a lenient pre-pass.
pub fn build_chunks_with(
    text: &str,
    spans: &[ScoredSpan],
    options: &HighlightOptions,
) -> Result<Vec<Chunk>, InvalidSpanError> {
    let offsets = CharOffsets::new(text);
    let len = offsets.char_len();

    if spans.is_empty() || !options.enabled {
        return Ok(vec![Chunk::plain(text, 0, len)]);
    }

    let order = sorted_order(spans);
    if let Err(err) = validate(spans, &order, len) {
        warn!(
            "event=chunk_build module=highlight status=rejected reason={} spans={} text_chars={}",
            err.kind(),
            spans.len(),
            len
        );
        return Err(err);
    }

    let mut chunks = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0usize;
    let mut last_index = 0usize;
    for (ordinal, &index) in order.iter().enumerate() {
        let span = &spans[index];
        last_index = index;
        if span.start > cursor {
            let gap = offsets
                .slice(cursor, span.start)
                .map_err(|err| InvalidSpanError::from_bounds(index, span, err))?;
            chunks.push(Chunk::plain(gap, cursor, span.start));
        }
        let body = offsets
            .slice(span.start, span.end)
            .map_err(|err| InvalidSpanError::from_bounds(index, span, err))?;
        chunks.push(Chunk::highlighted(body, span, ordinal));
        cursor = span.end;
    }
    if cursor < len {
        let tail = offsets
            .slice_from(cursor)
            .map_err(|err| InvalidSpanError::from_bounds(last_index, &spans[last_index], err))?;
        chunks.push(Chunk::plain(tail, cursor, len));
    }

    debug!(
        "event=chunk_build module=highlight status=ok spans={} chunks={} text_chars={}",
        spans.len(),
        chunks.len(),
        len
    );
    Ok(chunks)
}

/// Trims overlapping spans so each starts where the previous one ended.
///
/// Returns spans sorted by `start`, then `end`. Spans left empty by clipping are
/// dropped; spans that were zero-length to begin with are kept unless they
/// fall inside an earlier span. Scores are never merged.
pub fn clip_overlaps(spans: &[ScoredSpan]) -> Vec<ScoredSpan> {
    let mut clipped = Vec::with_capacity(spans.len());
    let mut cursor = 0usize;
    for index in sorted_order(spans) {
        let mut span = spans[index];
        if span.start < cursor {
            if span.end <= cursor {
                continue;
            }
            span.start = cursor;
        }
        cursor = cursor.max(span.end);
        clipped.push(span);
    }
    clipped
}

/// Span indices ordered by `(start, end, score)`, independent of input order.
fn sorted_order(spans: &[ScoredSpan]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..spans.len()).collect();
    order.sort_by(|&a, &b| {
        let (left, right) = (&spans[a], &spans[b]);
        (left.start, left.end)
            .cmp(&(right.start, right.end))
            .then(left.score.total_cmp(&right.score))
    });
    order
}

fn validate(spans: &[ScoredSpan], order: &[usize], len: usize) -> Result<(), InvalidSpanError> {
    for (index, span) in spans.iter().enumerate() {
        check_bounds(span.start, span.end, len)
            .map_err(|err| InvalidSpanError::from_bounds(index, span, err))?;
        if !(0.0..=1.0).contains(&span.score) {
            return Err(InvalidSpanError::InvalidScore {
                index,
                score: span.score,
            });
        }
    }

    let mut previous_end = 0usize;
    for &index in order {
        let span = &spans[index];
        if span.start < previous_end {
            return Err(InvalidSpanError::Overlapping {
                index,
                start: span.start,
                previous_end,
            });
        }
        previous_end = span.end;
    }
    Ok(())
}
