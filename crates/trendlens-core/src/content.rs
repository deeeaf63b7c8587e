use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::de;

/// Source platform of a content item.
///
/// Values are normalized to lowercase on decode; platforms without a
/// dedicated variant are kept verbatim in [`Platform::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    YouTube,
    Instagram,
    Other(String),
}

impl Platform {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Platform::YouTube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Other(name) => name,
        }
    }
}

impl From<String> for Platform {
    fn from(raw: String) -> Self {
        let name = raw.trim().to_lowercase();
        match name.as_str() {
            "youtube" => Platform::YouTube,
            "instagram" => Platform::Instagram,
            _ => Platform::Other(name),
        }
    }
}

impl From<&str> for Platform {
    fn from(raw: &str) -> Self {
        Platform::from(raw.to_string())
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Label a polarity: strictly above `threshold` is positive, strictly
    /// below `-threshold` is negative, anything else is neutral.
    #[must_use]
    pub fn from_polarity(polarity: f64, threshold: f64) -> Self {
        if polarity > threshold {
            SentimentLabel::Positive
        } else if polarity < -threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            other => Err(format!(
                "unknown sentiment label '{other}'; expected positive, negative or neutral"
            )),
        }
    }
}

/// Polarity/subjectivity reading for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// In `[-1.0, 1.0]`.
    pub polarity: f64,
    /// In `[0.0, 1.0]`.
    #[serde(default)]
    pub subjectivity: f64,
    pub label: SentimentLabel,
    /// Always `polarity.abs()`.
    #[serde(default)]
    pub confidence: f64,
}

impl SentimentResult {
    /// The value substituted whenever analysis cannot produce a reading.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
            label: SentimentLabel::Neutral,
            confidence: 0.0,
        }
    }

    #[must_use]
    pub fn from_scores(polarity: f64, subjectivity: f64, threshold: f64) -> Self {
        Self {
            polarity,
            subjectivity,
            label: SentimentLabel::from_polarity(polarity, threshold),
            confidence: polarity.abs(),
        }
    }
}

impl Default for SentimentResult {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Publication time as the collector sent it; parsed only when scoring.
///
/// A present value that is not a string (a `null` from a database row, say)
/// is kept as [`PublishedDate::Unusable`] and scores like an unparseable date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PublishedDate {
    Raw(String),
    Unusable(serde_json::Value),
}

impl PublishedDate {
    #[must_use]
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Raw(raw) => parse_timestamp(raw),
            Self::Unusable(_) => None,
        }
    }
}

impl From<String> for PublishedDate {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<&str> for PublishedDate {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

/// One collected video or post, plus the fields derived from it.
///
/// Every field decodes leniently: wrong types or malformed values become the
/// field's empty value. Keys not modelled here are kept in `extra` and
/// written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(default, deserialize_with = "de::string")]
    pub id: String,
    #[serde(default, deserialize_with = "de::string")]
    pub title: String,
    #[serde(default, deserialize_with = "de::string")]
    pub description: String,
    #[serde(default, deserialize_with = "de::platform", skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(default, deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// `None` only when the key is missing.
    #[serde(default, deserialize_with = "de::published_date", skip_serializing_if = "Option::is_none")]
    pub published_date: Option<PublishedDate>,
    #[serde(default, deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "de::count", skip_serializing_if = "Option::is_none")]
    pub view_count: Option<i64>,
    #[serde(default, deserialize_with = "de::count", skip_serializing_if = "Option::is_none")]
    pub like_count: Option<i64>,
    #[serde(default, deserialize_with = "de::count", skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<i64>,
    #[serde(default, deserialize_with = "de::count", skip_serializing_if = "Option::is_none")]
    pub share_count: Option<i64>,
    #[serde(default, deserialize_with = "de::hashtags")]
    pub hashtags: Vec<String>,

    #[serde(default, deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub title_clean: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub description_clean: Option<String>,
    #[serde(default, deserialize_with = "de::sentiment", skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentResult>,
    /// Percentage; see the engagement calculator.
    #[serde(default, deserialize_with = "de::float", skip_serializing_if = "Option::is_none")]
    pub engagement_rate: Option<f64>,
    /// In `[0.0, 1.0]`.
    #[serde(default, deserialize_with = "de::float", skip_serializing_if = "Option::is_none")]
    pub trending_score: Option<f64>,
    #[serde(default, deserialize_with = "de::timestamp", skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ContentItem {
    /// Platform name used for grouping; `"unknown"` when absent.
    #[must_use]
    pub fn platform_key(&self) -> &str {
        self.platform.as_ref().map_or("unknown", Platform::as_str)
    }

    #[must_use]
    pub fn is_processed(&self) -> bool {
        self.processed_at.is_some()
    }

    /// Title and description joined for sentiment analysis.
    #[must_use]
    pub fn analysis_text(&self) -> String {
        format!("{} {}", self.title, self.description)
            .trim()
            .to_string()
    }

    #[must_use]
    pub fn sentiment_label(&self) -> Option<SentimentLabel> {
        self.sentiment.map(|s| s.label)
    }
}

/// Stable identifier for an item that arrived without one.
///
/// Hex SHA-256 of `"{title}_{author}_{platform}"`.
#[must_use]
pub fn content_id(title: &str, author: &str, platform: &str) -> String {
    let input = format!("{title}_{author}_{platform}");
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

/// Parse the timestamp shapes collectors emit.
///
/// Accepts RFC 3339 (with `Z` or an offset), naive date-times with a `T` or
/// space separator and optional fraction (taken as UTC), and bare dates
/// (midnight UTC). Returns `None` for anything else, including empty input.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
#[path = "content_test.rs"]
mod tests;
