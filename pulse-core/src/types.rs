use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker Reddit uses for deleted authors and bodies.
pub const DELETED_MARKER: &str = "[deleted]";
/// Marker Reddit uses for bodies removed by moderators.
pub const REMOVED_MARKER: &str = "[removed]";

/// Label thresholds are inclusive on both sides of the neutral band.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Post,
    Comment,
    SearchResult,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Post => "post",
            ItemType::Comment => "comment",
            ItemType::SearchResult => "search_result",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A post, comment or search hit flattened into one source-agnostic record.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    pub item_type: ItemType,
    pub id: String,
    /// Empty for comments.
    pub title: String,
    pub text: String,
    pub author: String,
    pub score: i64,
    /// Always 0 for comments.
    pub num_comments: u64,
    pub created_at: DateTime<Utc>,
    pub subreddit: String,
    pub url: String,
    /// Depth in the reply tree; 0 for posts and top-level comments.
    pub level: u32,
    /// Only set for search results.
    pub search_term: Option<String>,
    pub relevance_score: Option<u32>,
}

impl NormalizedItem {
    /// Title and body joined the way they are fed to the sentiment scorer.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.title, self.text).trim().to_string()
    }

    pub fn has_content(&self) -> bool {
        !self.title.trim().is_empty() || !self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn from_score(combined_score: f64) -> Self {
        if combined_score >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if combined_score <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores for one piece of text. All decimals are rounded to 4 places.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentRecord {
    /// Rule-based model compound score in [-1, 1].
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    /// Pattern model polarity in [-1, 1].
    pub polarity: f64,
    /// Midpoint of `compound` and `polarity`.
    pub combined_score: f64,
    pub label: SentimentLabel,
    /// Character count after cleaning.
    pub text_length: usize,
}

impl SentimentRecord {
    /// The fixed record used for short, empty or unscorable text.
    pub fn neutral() -> Self {
        Self {
            compound: 0.0,
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            polarity: 0.0,
            combined_score: 0.0,
            label: SentimentLabel::Neutral,
            text_length: 0,
        }
    }
}

/// One exported line of the detailed table.
///
/// Field order is the column order of the CSV export; the `vader_*` and
/// `textblob_polarity` names are kept for existing consumers of the files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRow {
    pub date: String,
    pub datetime: String,
    pub source: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub subreddit: String,
    pub title: String,
    pub text: String,
    pub full_text: String,
    pub score: i64,
    pub author: String,
    pub level: u32,
    pub url: String,
    pub relevance_score: u32,
    pub vader_compound: f64,
    pub vader_positive: f64,
    pub vader_negative: f64,
    pub vader_neutral: f64,
    pub textblob_polarity: f64,
    pub combined_score: f64,
    pub sentiment_label: SentimentLabel,
    pub text_length: usize,
    pub id: String,
    pub num_comments: u64,
    pub search_term: Option<String>,
}

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
