//! Editor-side insertion capability.
//!
//! # Responsibility
//! - Define the capability other components hold to splice text into a note.
//! - Provide a reference in-memory `NoteBuffer` implementing it.
//!
//! # Invariants
//! - Offsets and the cursor count chars and always sit on a char boundary.
//! - Edits are applied one at a time through `&mut self`.

use crate::text::{char_len, CharOffsets};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Editor-layer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Requested char offset is past the end of the buffer.
    OffsetOutOfBounds { offset: usize, len: usize },
    /// Block body is empty or whitespace-only.
    EmptyBody,
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OffsetOutOfBounds { offset, len } => {
                write!(f, "offset {offset} is out of bounds for buffer of {len} chars")
            }
            Self::EmptyBody => write!(f, "block body must not be empty"),
        }
    }
}

impl Error for EditorError {}

/// Where inserted text lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    /// At the editor's current cursor.
    Cursor,
    /// After the last char.
    End,
    /// At an explicit char offset.
    Offset(usize),
}

/// Capability to splice text into a note owned elsewhere.
pub trait InsertCapability {
    /// Inserts `text` and returns the char offset just past it.
    fn insert(&mut self, text: &str, at: InsertAt) -> Result<usize, EditorError>;
}

impl<T: InsertCapability + ?Sized> InsertCapability for &mut T {
    fn insert(&mut self, text: &str, at: InsertAt) -> Result<usize, EditorError> {
        (**self).insert(text, at)
    }
}

/// In-memory note buffer with a char cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteBuffer {
    content: String,
    cursor: usize,
}

impl NoteBuffer {
    /// Creates a buffer with the cursor at the end of `content`.
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = char_len(&content);
        Self { content, cursor }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor to char `offset`.
    pub fn set_cursor(&mut self, offset: usize) -> Result<(), EditorError> {
        let len = char_len(&self.content);
        if offset > len {
            return Err(EditorError::OffsetOutOfBounds { offset, len });
        }
        self.cursor = offset;
        Ok(())
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl InsertCapability for NoteBuffer {
    fn insert(&mut self, text: &str, at: InsertAt) -> Result<usize, EditorError> {
        let offsets = CharOffsets::new(&self.content);
        let len = offsets.char_len();
        let offset = match at {
            InsertAt::Cursor => self.cursor.min(len),
            InsertAt::End => len,
            InsertAt::Offset(offset) => offset,
        };
        let byte = offsets
            .byte_offset(offset)
            .ok_or(EditorError::OffsetOutOfBounds { offset, len })?;

        self.content.insert_str(byte, text);
        let after = offset + char_len(text);
        self.cursor = after;
        Ok(after)
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorError, InsertAt, InsertCapability, NoteBuffer};

    #[test]
    fn new_buffer_places_cursor_at_end() {
        let buffer = NoteBuffer::new("héllo");
        assert_eq!(buffer.cursor(), 5);
    }

    #[test]
    fn insert_at_cursor_moves_cursor_past_text() {
        let mut buffer = NoteBuffer::new("ac");
        buffer.set_cursor(1).expect("cursor in bounds");
        let after = buffer.insert("b", InsertAt::Cursor).expect("insert at cursor");
        assert_eq!(buffer.content(), "abc");
        assert_eq!(after, 2);
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn insert_at_offset_respects_multibyte_chars() {
        let mut buffer = NoteBuffer::new("ñu");
        buffer.insert("-", InsertAt::Offset(1)).expect("insert at offset");
        assert_eq!(buffer.content(), "ñ-u");
    }

    #[test]
    fn insert_at_end_ignores_cursor() {
        let mut buffer = NoteBuffer::new("abc");
        buffer.set_cursor(0).expect("cursor in bounds");
        buffer.insert("!", InsertAt::End).expect("insert at end");
        assert_eq!(buffer.content(), "abc!");
    }

    #[test]
    fn rejects_offsets_past_end() {
        let mut buffer = NoteBuffer::new("ab");
        assert_eq!(
            buffer.insert("x", InsertAt::Offset(3)),
            Err(EditorError::OffsetOutOfBounds { offset: 3, len: 2 })
        );
        assert_eq!(
            buffer.set_cursor(9),
            Err(EditorError::OffsetOutOfBounds { offset: 9, len: 2 })
        );
        assert_eq!(buffer.content(), "ab");
    }
}
