//! Score to intensity bucket lookup.

use serde::{Deserialize, Serialize};

/// Upper bounds of the five half-open buckets.
pub const BUCKET_THRESHOLDS: [f64; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];

/// Visual intensity bucket, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBucket {
    Faint,
    Low,
    Medium,
    High,
    Strong,
}

const BUCKETS: [ScoreBucket; 5] = [
    ScoreBucket::Faint,
    ScoreBucket::Low,
    ScoreBucket::Medium,
    ScoreBucket::High,
    ScoreBucket::Strong,
];

impl ScoreBucket {
    /// Zero-based intensity level.
    pub fn level(self) -> u8 {
        self as u8
    }
}

/// Color palette selected by the host theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    Light,
    Dark,
}

const LIGHT_COLORS: [&str; 5] = [
    "rgba(250, 204, 21, 0.15)",
    "rgba(250, 204, 21, 0.30)",
    "rgba(250, 204, 21, 0.45)",
    "rgba(250, 204, 21, 0.60)",
    "rgba(250, 204, 21, 0.80)",
];

const DARK_COLORS: [&str; 5] = [
    "rgba(161, 98, 7, 0.25)",
    "rgba(161, 98, 7, 0.40)",
    "rgba(161, 98, 7, 0.55)",
    "rgba(161, 98, 7, 0.70)",
    "rgba(161, 98, 7, 0.90)",
];

/// Bucket plus the palette it renders with.
///
/// Ordering compares the bucket first, so ids from one palette sort by
/// intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BucketId {
    pub bucket: ScoreBucket,
    pub palette: Palette,
}

impl BucketId {
    /// CSS color for this bucket in its palette.
    pub fn color(self) -> &'static str {
        let colors = match self.palette {
            Palette::Light => &LIGHT_COLORS,
            Palette::Dark => &DARK_COLORS,
        };
        colors[usize::from(self.bucket.level())]
    }
}

/// Maps a score to its bucket.
///
/// Scores at or above `1.0` saturate into the top bucket; negative and NaN
/// scores land in the lowest one.
pub fn score_bucket(score: f64) -> ScoreBucket {
    if score.is_nan() {
        return ScoreBucket::Faint;
    }
    for (bucket, upper) in BUCKETS.iter().zip(BUCKET_THRESHOLDS.iter()) {
        if score < *upper {
            return *bucket;
        }
    }
    ScoreBucket::Strong
}

/// Maps a score to its bucket in the light or dark palette.
pub fn classify_score(score: f64, dark_mode: bool) -> BucketId {
    BucketId {
        bucket: score_bucket(score),
        palette: if dark_mode {
            Palette::Dark
        } else {
            Palette::Light
        },
    }
}
