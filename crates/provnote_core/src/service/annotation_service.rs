//! Annotation use-case service.
//!
//! # Responsibility
//! - Format provenance-tagged blocks and hand them to the editor capability.
//! - Generate stable ids for embedded image references.
//!
//! # Invariants
//! - Text only reaches the note through the held `InsertCapability`.
//! - Empty bodies are rejected before anything is inserted.

use crate::clock::{Clock, SystemClock};
use crate::editor::{EditorError, InsertAt, InsertCapability};
use crate::markup::formatter::{format_image_ref, Formatter};
use crate::model::block::ContentBlockType;
use log::info;
use uuid::Uuid;

/// Inserted image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedImage {
    /// Generated image id written into the reference line.
    pub image_id: String,
    /// Char offset just past the inserted reference.
    pub end_offset: usize,
}

/// Annotation facade over an editor capability.
pub struct AnnotationService<E: InsertCapability, C: Clock = SystemClock> {
    editor: E,
    formatter: Formatter<C>,
}

impl<E: InsertCapability> AnnotationService<E> {
    /// Creates a service stamping blocks with local time.
    pub fn new(editor: E) -> Self {
        Self::with_formatter(editor, Formatter::new())
    }
}

impl<E: InsertCapability, C: Clock> AnnotationService<E, C> {
    pub fn with_formatter(editor: E, formatter: Formatter<C>) -> Self {
        Self { editor, formatter }
    }

    /// Inserts quoted source material titled `title` at the cursor.
    pub fn add_source_quote(&mut self, body: &str, title: &str) -> Result<usize, EditorError> {
        self.insert_block(body, title, ContentBlockType::Source)
    }

    /// Inserts model output attributed to `model` at the cursor.
    pub fn add_ai_response(&mut self, body: &str, model: &str) -> Result<usize, EditorError> {
        self.insert_block(body, model, ContentBlockType::Ai)
    }

    /// Inserts a personal note at the cursor.
    pub fn add_user_note(&mut self, body: &str) -> Result<usize, EditorError> {
        self.insert_block(body, "", ContentBlockType::User)
    }

    /// Inserts untagged legacy content under an uppercase header.
    pub fn add_plain(&mut self, body: &str, label: &str) -> Result<usize, EditorError> {
        self.insert_block(body, label, ContentBlockType::Default)
    }

    /// Inserts an image reference with a fresh id.
    pub fn add_image(&mut self, filename: &str) -> Result<InsertedImage, EditorError> {
        let image_id = Uuid::new_v4().to_string();
        let end_offset = self
            .editor
            .insert(&format_image_ref(&image_id, filename), InsertAt::Cursor)?;
        info!("event=block_insert module=service status=ok kind=image");
        Ok(InsertedImage {
            image_id,
            end_offset,
        })
    }

    /// Returns the held editor capability.
    pub fn into_editor(self) -> E {
        self.editor
    }

    fn insert_block(
        &mut self,
        body: &str,
        label: &str,
        kind: ContentBlockType,
    ) -> Result<usize, EditorError> {
        if body.trim().is_empty() {
            return Err(EditorError::EmptyBody);
        }
        let text = self.formatter.format(body, label, kind);
        let end_offset = self.editor.insert(&text, InsertAt::Cursor)?;
        info!(
            "event=block_insert module=service status=ok kind={}",
            kind.as_str()
        );
        Ok(end_offset)
    }
}
