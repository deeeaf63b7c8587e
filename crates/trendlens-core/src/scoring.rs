//! Tunable constants for trending, hashtag and topic scoring.
//!
//! Every field has a default matching the production dashboard, so an empty
//! (or absent) YAML file yields the stock behaviour.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Component weights of the per-item trending score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendingWeights {
    pub engagement: f64,
    pub recency: f64,
    pub hashtags: f64,
    pub sentiment: f64,
}

impl Default for TrendingWeights {
    fn default() -> Self {
        Self {
            engagement: 0.4,
            recency: 0.3,
            hashtags: 0.2,
            sentiment: 0.1,
        }
    }
}

/// Settings for ranking hashtags as topics across a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicConfig {
    /// Hashtags with fewer occurrences than this are not reported.
    pub min_items: usize,
    /// Item count at which the growth component saturates.
    pub growth_saturation: f64,
    /// Age in hours at which the recency component reaches zero.
    pub recency_horizon_hours: f64,
    /// Age assumed for items with a missing or unparseable date.
    pub default_age_hours: f64,
    pub engagement_weight: f64,
    pub growth_weight: f64,
    pub recency_weight: f64,
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            min_items: 2,
            growth_saturation: 10.0,
            recency_horizon_hours: 168.0,
            default_age_hours: 24.0,
            engagement_weight: 0.4,
            growth_weight: 0.4,
            recency_weight: 0.2,
        }
    }
}

/// A sentiment lexicon word added on top of the built-in lexicon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    pub polarity: f64,
    #[serde(default = "default_subjectivity")]
    pub subjectivity: f64,
}

fn default_subjectivity() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: TrendingWeights,
    /// Engagement rate (percent) at which the engagement component saturates.
    pub engagement_saturation: f64,
    /// Items younger than this many hours earn a recency component.
    pub recency_window_hours: f64,
    /// Flat amount added to the total when `published_date` is present but unparseable.
    pub unparseable_date_bonus: f64,
    /// Hashtag count at which the hashtag component saturates.
    pub hashtag_saturation: f64,
    /// Polarity magnitude above which a text is labelled positive/negative.
    pub sentiment_threshold: f64,
    /// Substrings that mark a hashtag as inherently "hot".
    pub trending_keywords: Vec<String>,
    pub keyword_boost: f64,
    /// Number of hashtags reported by the aggregator.
    pub top_hashtags: usize,
    pub topics: TopicConfig,
    pub extra_lexicon: Vec<LexiconEntry>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: TrendingWeights::default(),
            engagement_saturation: 10.0,
            recency_window_hours: 24.0,
            unparseable_date_bonus: 0.15,
            hashtag_saturation: 5.0,
            sentiment_threshold: 0.1,
            trending_keywords: ["viral", "trending", "hot", "breaking", "new", "latest"]
                .into_iter()
                .map(String::from)
                .collect(),
            keyword_boost: 1.5,
            top_hashtags: 15,
            topics: TopicConfig::default(),
            extra_lexicon: Vec::new(),
        }
    }
}

/// Load and validate scoring overrides from a YAML file.
///
/// A path that does not exist yields [`ScoringConfig::default`].
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, parsed, or fails validation.
pub fn load_scoring_config(path: &Path) -> Result<ScoringConfig, ConfigError> {
    if !path.exists() {
        return Ok(ScoringConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ScoringFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    ScoringConfig::from_yaml(&content)
}

impl ScoringConfig {
    /// Parse and validate a YAML document. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the YAML is malformed or fails validation.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: ScoringConfig = if content.trim().is_empty() {
            ScoringConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check ranges and consistency of every tunable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` describing the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit_fields = [
            ("weights.engagement", self.weights.engagement),
            ("weights.recency", self.weights.recency),
            ("weights.hashtags", self.weights.hashtags),
            ("weights.sentiment", self.weights.sentiment),
            ("unparseable_date_bonus", self.unparseable_date_bonus),
            ("sentiment_threshold", self.sentiment_threshold),
            ("topics.engagement_weight", self.topics.engagement_weight),
            ("topics.growth_weight", self.topics.growth_weight),
            ("topics.recency_weight", self.topics.recency_weight),
        ];
        for (name, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        let positive_fields = [
            ("engagement_saturation", self.engagement_saturation),
            ("recency_window_hours", self.recency_window_hours),
            ("hashtag_saturation", self.hashtag_saturation),
            ("topics.growth_saturation", self.topics.growth_saturation),
            ("topics.recency_horizon_hours", self.topics.recency_horizon_hours),
        ];
        for (name, value) in positive_fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        if !(self.topics.default_age_hours.is_finite() && self.topics.default_age_hours >= 0.0) {
            return Err(ConfigError::Validation(format!(
                "topics.default_age_hours must be non-negative, got {}",
                self.topics.default_age_hours
            )));
        }

        if !(self.keyword_boost.is_finite() && self.keyword_boost >= 1.0) {
            return Err(ConfigError::Validation(format!(
                "keyword_boost must be at least 1.0, got {}",
                self.keyword_boost
            )));
        }

        if self.top_hashtags == 0 {
            return Err(ConfigError::Validation(
                "top_hashtags must be greater than zero".to_string(),
            ));
        }

        if self.trending_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "trending_keywords must contain at least one keyword".to_string(),
            ));
        }

        let mut seen_words = HashSet::new();
        for entry in &self.extra_lexicon {
            let word = entry.word.trim().to_lowercase();
            if word.is_empty() || word.contains(char::is_whitespace) {
                return Err(ConfigError::Validation(format!(
                    "lexicon word '{}' must be a single non-empty word",
                    entry.word
                )));
            }
            if !(-1.0..=1.0).contains(&entry.polarity) {
                return Err(ConfigError::Validation(format!(
                    "lexicon word '{word}' has polarity {} outside [-1, 1]",
                    entry.polarity
                )));
            }
            if !(0.0..=1.0).contains(&entry.subjectivity) {
                return Err(ConfigError::Validation(format!(
                    "lexicon word '{word}' has subjectivity {} outside [0, 1]",
                    entry.subjectivity
                )));
            }
            if !seen_words.insert(word.clone()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate lexicon word: '{word}'"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "scoring_test.rs"]
mod tests;
