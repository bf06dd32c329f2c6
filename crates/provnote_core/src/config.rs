//! Engine configuration.
//!
//! # Responsibility
//! - Hold caller-tunable knobs for formatting and highlighting.
//! - Normalize untrusted host input into safe values.
//!
//! # Invariants
//! - A normalized timestamp format never fails to render.
//! - Highlight options never change bucket boundaries.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp format used for `DATE` metadata and plain headers.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Formatter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// `strftime`-style pattern for block timestamps.
    pub timestamp_format: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl MarkupConfig {
    /// Returns a copy with the timestamp format normalized.
    pub fn normalized(&self) -> Self {
        Self {
            timestamp_format: normalize_timestamp_format(&self.timestamp_format),
        }
    }
}

/// Per-render highlight switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightOptions {
    /// When `false`, the whole text renders as one plain chunk.
    pub enabled: bool,
    /// Selects the dark palette for score buckets.
    pub dark_mode: bool,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            dark_mode: false,
        }
    }
}

/// Combined configuration handed over by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub markup: MarkupConfig,
    pub highlight: HighlightOptions,
}

/// Normalizes a timestamp format.
///
/// Blank formats, formats with unknown specifiers and formats that cannot
/// render a local date-time (offset or zone specifiers such as `%z`) fall
/// back to [`DEFAULT_TIMESTAMP_FORMAT`].
pub fn normalize_timestamp_format(format: &str) -> String {
    let trimmed = format.trim();
    if trimmed.is_empty() {
        return DEFAULT_TIMESTAMP_FORMAT.to_string();
    }
    let has_error_item = StrftimeItems::new(trimmed).any(|item| matches!(item, Item::Error));
    if has_error_item || render_timestamp(&NaiveDateTime::default(), trimmed).is_none() {
        log::warn!("event=config_normalize module=config status=fallback field=timestamp_format");
        return DEFAULT_TIMESTAMP_FORMAT.to_string();
    }
    trimmed.to_string()
}

/// Renders `instant` with `format`, `None` when chrono cannot render it.
pub fn render_timestamp(instant: &NaiveDateTime, format: &str) -> Option<String> {
    let mut rendered = String::new();
    write!(rendered, "{}", instant.format(format)).ok()?;
    Some(rendered)
}
