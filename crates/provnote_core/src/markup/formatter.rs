//! Structured content to tagged text.
//!
//! # Invariants
//! - Output for tagged types always starts with `\n\n` and ends with the
//!   close tag plus `\n`.
//! - Metadata values are single-line; labels and timestamps are flattened.
//! - `Default` output is a plain header, not a parseable typed block.

use crate::clock::{Clock, SystemClock};
use crate::config::{render_timestamp, MarkupConfig, DEFAULT_TIMESTAMP_FORMAT};
use crate::markup::grammar::{metadata_line, sanitize_attribute, tag_row};
use crate::model::block::{ContentBlockType, MetadataKey};
use crate::text::single_line;
use log::debug;

/// Block serializer bound to a clock and markup settings.
#[derive(Debug, Clone)]
pub struct Formatter<C: Clock = SystemClock> {
    clock: C,
    config: MarkupConfig,
}

impl Formatter<SystemClock> {
    /// Formatter using local time and default settings.
    pub fn new() -> Self {
        Self::with_clock(SystemClock, MarkupConfig::default())
    }

    pub fn with_config(config: MarkupConfig) -> Self {
        Self::with_clock(SystemClock, config)
    }
}

impl Default for Formatter<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Formatter<C> {
    /// Formatter with a caller-provided clock. The config is normalized.
    pub fn with_clock(clock: C, config: MarkupConfig) -> Self {
        Self {
            clock,
            config: config.normalized(),
        }
    }

    /// Current timestamp rendered with the configured format.
    pub fn timestamp(&self) -> String {
        let now = self.clock.now();
        let rendered = render_timestamp(&now, &self.config.timestamp_format)
            .or_else(|| render_timestamp(&now, DEFAULT_TIMESTAMP_FORMAT))
            .unwrap_or_default();
        single_line(&rendered)
    }

    /// Builds an insertion string for one block.
    ///
    /// `label` is the `TITLE` for sources, the `MODEL` for AI content and the
    /// header for plain content; user notes ignore it. For `Image`, `label`
    /// is the image id and `body` the filename.
    pub fn format(&self, body: &str, label: &str, kind: ContentBlockType) -> String {
        let formatted = match tag_row(kind) {
            Some(row) => {
                let timestamp = self.timestamp();
                let label = single_line(label);
                let mut out = String::with_capacity(body.len() + 96);
                out.push_str("\n\n");
                out.push_str(row.open);
                out.push('\n');
                for key in row.keys {
                    let value = match key {
                        MetadataKey::Title | MetadataKey::Model => label.as_str(),
                        MetadataKey::Date => timestamp.as_str(),
                        MetadataKey::Quote | MetadataKey::Content | MetadataKey::Note => "",
                    };
                    out.push_str(&metadata_line(*key, value));
                    out.push('\n');
                }
                out.push_str(body);
                out.push('\n');
                out.push_str(row.close);
                out.push('\n');
                out
            }
            None if kind == ContentBlockType::Image => format_image_ref(label, body),
            None => format!(
                "\n\n{}\n{}\n\n{}\n",
                single_line(label).to_uppercase(),
                self.timestamp(),
                body
            ),
        };

        debug!(
            "event=block_format module=markup status=ok kind={} body_chars={}",
            kind.as_str(),
            body.chars().count()
        );
        formatted
    }
}

/// Formats one block with local time and default settings.
pub fn format(body: &str, label: &str, kind: ContentBlockType) -> String {
    Formatter::new().format(body, label, kind)
}

/// Builds a self-closing image reference line.
///
/// Quotes and line breaks are dropped from both attributes.
pub fn format_image_ref(id: &str, filename: &str) -> String {
    format!(
        "\n<img-ref id=\"{}\" filename=\"{}\">\n",
        sanitize_attribute(id),
        sanitize_attribute(filename)
    )
}
