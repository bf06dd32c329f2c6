//! Content block model.
//!
//! # Responsibility
//! - Define the closed set of provenance types a note run can carry.
//! - Keep block metadata ordered as it appeared in the buffer.
//!
//! # Invariants
//! - `metadata` is only populated for `Source`, `Ai` and `User` blocks.
//! - `image_id`/`image_filename` are only populated for `Image` blocks.

use serde::{Deserialize, Serialize};

/// Provenance type of one note block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentBlockType {
    /// Quoted primary-source material.
    Source,
    /// Model-generated commentary.
    Ai,
    /// The researcher's own note.
    User,
    /// Self-closing embedded image reference.
    Image,
    /// Implicit container for untagged lines.
    Default,
}

impl ContentBlockType {
    /// Stable lowercase id used on the FFI boundary and in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Ai => "ai",
            Self::User => "user",
            Self::Image => "image",
            Self::Default => "default",
        }
    }

    /// Parses the id produced by [`ContentBlockType::as_str`].
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "source" => Some(Self::Source),
            "ai" => Some(Self::Ai),
            "user" => Some(Self::User),
            "image" => Some(Self::Image),
            "default" => Some(Self::Default),
            _ => None,
        }
    }

    /// Whether blocks of this type are delimited by an open/close tag pair.
    pub fn is_tagged(self) -> bool {
        matches!(self, Self::Source | Self::Ai | Self::User)
    }
}

/// Recognized metadata key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetadataKey {
    Title,
    Date,
    Quote,
    Model,
    Content,
    Note,
}

impl MetadataKey {
    /// Key as written in the buffer, without the trailing colon.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "TITLE",
            Self::Date => "DATE",
            Self::Quote => "QUOTE",
            Self::Model => "MODEL",
            Self::Content => "CONTENT",
            Self::Note => "NOTE",
        }
    }
}

/// One `KEY: value` metadata line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: MetadataKey,
    pub value: String,
}

/// Insertion-ordered metadata mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockMetadata {
    entries: Vec<MetadataEntry>,
}

impl BlockMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing an existing value in place.
    pub fn insert(&mut self, key: MetadataKey, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.value = value,
            None => self.entries.push(MetadataEntry { key, value }),
        }
    }

    pub fn get(&self, key: MetadataKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    pub fn keys(&self) -> Vec<MetadataKey> {
        self.entries.iter().map(|entry| entry.key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetadataEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One parsed run of note content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Serialized as `type` to match the host schema.
    #[serde(rename = "type")]
    pub kind: ContentBlockType,
    pub metadata: BlockMetadata,
    /// Content lines with metadata lines removed.
    pub body: Vec<String>,
    pub image_id: Option<String>,
    pub image_filename: Option<String>,
}

impl ContentBlock {
    /// Creates an empty block of `kind`.
    pub fn new(kind: ContentBlockType) -> Self {
        Self {
            kind,
            metadata: BlockMetadata::new(),
            body: Vec::new(),
            image_id: None,
            image_filename: None,
        }
    }

    /// Creates an image reference block.
    pub fn image(id: impl Into<String>, filename: impl Into<String>) -> Self {
        let mut block = Self::new(ContentBlockType::Image);
        block.image_id = Some(id.into());
        block.image_filename = Some(filename.into());
        block
    }

    /// Body lines joined with `\n`.
    pub fn body_text(&self) -> String {
        self.body.join("\n")
    }
}
