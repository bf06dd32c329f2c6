//! Tag grammar table.
//!
//! Open/close tags and expected metadata keys live in one per-type table so
//! both the formatter and the parser consult the same source.

use crate::model::block::{ContentBlockType, MetadataKey};
use once_cell::sync::Lazy;
use regex::Regex;

pub const SOURCE_OPEN_TAG: &str = "<source-content>";
pub const SOURCE_CLOSE_TAG: &str = "</source-content>";
pub const AI_OPEN_TAG: &str = "<ai-content>";
pub const AI_CLOSE_TAG: &str = "</ai-content>";
pub const USER_OPEN_TAG: &str = "<user-note>";
pub const USER_CLOSE_TAG: &str = "</user-note>";

static IMAGE_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^<img-ref id="([^"]*)" filename="([^"]*)">$"#).expect("valid image ref regex")
});

/// Grammar row for one tagged block type.
#[derive(Debug, Clone, Copy)]
pub struct TagRow {
    pub kind: ContentBlockType,
    pub open: &'static str,
    pub close: &'static str,
    /// Metadata keys in the order they follow the open tag.
    pub keys: &'static [MetadataKey],
}

static TAG_TABLE: [TagRow; 3] = [
    TagRow {
        kind: ContentBlockType::Source,
        open: SOURCE_OPEN_TAG,
        close: SOURCE_CLOSE_TAG,
        keys: &[MetadataKey::Title, MetadataKey::Date, MetadataKey::Quote],
    },
    TagRow {
        kind: ContentBlockType::Ai,
        open: AI_OPEN_TAG,
        close: AI_CLOSE_TAG,
        keys: &[MetadataKey::Model, MetadataKey::Date, MetadataKey::Content],
    },
    TagRow {
        kind: ContentBlockType::User,
        open: USER_OPEN_TAG,
        close: USER_CLOSE_TAG,
        keys: &[MetadataKey::Date, MetadataKey::Note],
    },
];

/// Returns the grammar row for a tagged type, `None` for `Image`/`Default`.
pub fn tag_row(kind: ContentBlockType) -> Option<&'static TagRow> {
    TAG_TABLE.iter().find(|row| row.kind == kind)
}

/// Expected metadata keys for `kind`, empty for untagged types.
pub fn expected_keys(kind: ContentBlockType) -> &'static [MetadataKey] {
    tag_row(kind).map(|row| row.keys).unwrap_or(&[])
}

/// Structural role of one buffer line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Open(ContentBlockType),
    Close(ContentBlockType),
    ImageRef { id: &'a str, filename: &'a str },
    Text,
}

/// Classifies one line. Tag lines must match exactly; only a single
/// trailing `\r` from CRLF buffers is ignored.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if !line.starts_with('<') {
        return LineKind::Text;
    }
    for row in &TAG_TABLE {
        if line == row.open {
            return LineKind::Open(row.kind);
        }
        if line == row.close {
            return LineKind::Close(row.kind);
        }
    }
    match IMAGE_REF_RE.captures(line) {
        Some(caps) => match (caps.get(1), caps.get(2)) {
            (Some(id), Some(filename)) => LineKind::ImageRef {
                id: id.as_str(),
                filename: filename.as_str(),
            },
            _ => LineKind::Text,
        },
        None => LineKind::Text,
    }
}

/// Returns the value when `line` is a `KEY: value` line for `key`.
///
/// Only the single space written after the colon is removed; the value is
/// otherwise kept verbatim.
pub fn metadata_value(line: &str, key: MetadataKey) -> Option<&str> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.strip_prefix(key.as_str())
        .and_then(|rest| rest.strip_prefix(':'))
        .map(|value| value.strip_prefix(' ').unwrap_or(value))
}

/// Renders one metadata line; empty values render as a bare `KEY:` marker.
pub fn metadata_line(key: MetadataKey, value: &str) -> String {
    if value.is_empty() {
        format!("{}:", key.as_str())
    } else {
        format!("{}: {}", key.as_str(), value)
    }
}

/// Removes characters that would break the image reference attribute syntax.
pub fn sanitize_attribute(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !matches!(ch, '"' | '\n' | '\r'))
        .collect()
}
