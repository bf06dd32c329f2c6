//! Text span primitives shared by the markup and highlight engines.
//!
//! # Responsibility
//! - Split and re-join text on the paragraph separator.
//! - Map char offsets to byte offsets and extract substrings by char index.
//! - Check `[start, end)` bounds against a text length.
//!
//! # Invariants
//! - All public offsets count Unicode scalar values, never bytes.
//! - `join_paragraphs(&split_paragraphs(text)) == text` for every input.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Separator between paragraphs in source documents and chunk text.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Splits text into paragraph units on [`PARAGRAPH_SEPARATOR`].
///
/// Empty units are kept so the split is reversible with [`join_paragraphs`].
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split(PARAGRAPH_SEPARATOR).collect()
}

/// Byte ranges of the paragraph units [`split_paragraphs`] would return.
///
/// Separators are excluded from every range. There is always one more range
/// than there are separators.
pub fn paragraph_ranges(text: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = 0usize;
    for (at, separator) in text.match_indices(PARAGRAPH_SEPARATOR) {
        ranges.push((start, at));
        start = at + separator.len();
    }
    ranges.push((start, text.len()));
    ranges
}

/// Re-joins paragraph units produced by [`split_paragraphs`].
pub fn join_paragraphs<S: AsRef<str>>(parts: &[S]) -> String {
    let mut joined = String::new();
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            joined.push_str(PARAGRAPH_SEPARATOR);
        }
        joined.push_str(part.as_ref());
    }
    joined
}

/// Returns text length in chars.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Bounds violation for a `[start, end)` char range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsError {
    /// `start` is greater than `end`.
    Reversed { start: usize, end: usize },
    /// `end` is past the end of the text.
    OutOfBounds { end: usize, len: usize },
}

impl Display for BoundsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reversed { start, end } => {
                write!(f, "range start ({start}) must be <= end ({end})")
            }
            Self::OutOfBounds { end, len } => {
                write!(f, "range end ({end}) exceeds text length ({len})")
            }
        }
    }
}

impl Error for BoundsError {}

/// Checks that `[start, end)` is a valid range over a text of `len` chars.
pub fn check_bounds(start: usize, end: usize, len: usize) -> Result<(), BoundsError> {
    if start > end {
        return Err(BoundsError::Reversed { start, end });
    }
    if end > len {
        return Err(BoundsError::OutOfBounds { end, len });
    }
    Ok(())
}

/// Char-to-byte offset table for one text.
///
/// Built once per call so repeated slicing stays linear overall.
#[derive(Debug, Clone)]
pub struct CharOffsets<'a> {
    text: &'a str,
    // Byte offset of every char boundary, including the final one.
    boundaries: Vec<usize>,
}

impl<'a> CharOffsets<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    /// Text length in chars.
    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Byte offset for a char offset, `None` past the end.
    pub fn byte_offset(&self, char_index: usize) -> Option<usize> {
        self.boundaries.get(char_index).copied()
    }

    /// Borrowed substring for the char range `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> Result<&'a str, BoundsError> {
        check_bounds(start, end, self.char_len())?;
        Ok(&self.text[self.boundaries[start]..self.boundaries[end]])
    }

    /// Borrowed suffix starting at char offset `start`.
    pub fn slice_from(&self, start: usize) -> Result<&'a str, BoundsError> {
        self.slice(start, self.char_len())
    }
}

/// Extracts the substring for char range `[start, end)`.
pub fn slice_chars(text: &str, start: usize, end: usize) -> Result<&str, BoundsError> {
    CharOffsets::new(text).slice(start, end)
}

/// Replaces line breaks with spaces so a value fits on one line.
pub fn single_line(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::{
        char_len, check_bounds, join_paragraphs, paragraph_ranges, single_line, slice_chars,
        split_paragraphs, BoundsError, CharOffsets,
    };

    #[test]
    fn paragraph_split_is_reversible() {
        for text in ["", "one", "one\n\ntwo", "\n\n", "a\n\n\nb", "x\n\n\n\ny\n\n"] {
            let parts = split_paragraphs(text);
            assert_eq!(join_paragraphs(&parts), text, "round trip failed for {text:?}");
        }
    }

    #[test]
    fn paragraph_split_keeps_single_newlines_inside_units() {
        assert_eq!(split_paragraphs("a\nb\n\nc"), vec!["a\nb", "c"]);
    }

    #[test]
    fn slice_uses_char_offsets_for_multibyte_text() {
        let text = "héllo wörld";
        assert_eq!(slice_chars(text, 1, 5).expect("in-bounds slice"), "éllo");
        assert_eq!(slice_chars(text, 6, 11).expect("tail slice"), "wörld");
        assert_eq!(char_len(text), 11);
    }

    #[test]
    fn check_bounds_rejects_reversed_and_overflowing_ranges() {
        assert_eq!(
            check_bounds(4, 2, 10),
            Err(BoundsError::Reversed { start: 4, end: 2 })
        );
        assert_eq!(
            check_bounds(0, 11, 10),
            Err(BoundsError::OutOfBounds { end: 11, len: 10 })
        );
        assert!(check_bounds(10, 10, 10).is_ok());
    }

    #[test]
    fn offsets_table_exposes_final_boundary() {
        let offsets = CharOffsets::new("aé");
        assert_eq!(offsets.char_len(), 2);
        assert_eq!(offsets.byte_offset(2), Some(3));
        assert_eq!(offsets.byte_offset(3), None);
        assert_eq!(offsets.slice_from(1).expect("suffix"), "é");
    }

    #[test]
    fn single_line_flattens_line_breaks() {
        assert_eq!(single_line("a\r\nb\nc\rd"), "a b c d");
    }

    #[test]
    fn paragraph_ranges_match_split_units() {
        let text = "a\n\n\nb\n\n";
        let ranges = paragraph_ranges(text);
        let units: Vec<&str> = ranges.iter().map(|&(start, end)| &text[start..end]).collect();
        assert_eq!(units, split_paragraphs(text));
        assert_eq!(paragraph_ranges(""), vec![(0, 0)]);
    }
}
