//! Batch-level trend rollups, ranking and filtering.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use trendlens_core::{ContentItem, Platform, ScoringConfig, SentimentLabel};
use uuid::Uuid;

use crate::engagement::round_to;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HashtagTrend {
    pub hashtag: String,
    pub count: usize,
    /// In `[0, 1]`, rounded to 3 decimals.
    pub trend_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentBreakdown {
    pub distribution: BTreeMap<SentimentLabel, usize>,
    pub total_analyzed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementStats {
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub count: usize,
}

/// Rollup of one batch. Recomputed on demand, never persisted.
///
/// An empty batch produces empty collections and omits the totals,
/// timestamp and id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSummary {
    pub trending_hashtags: Vec<HashtagTrend>,
    pub platform_distribution: BTreeMap<String, usize>,
    #[serde(serialize_with = "some_or_empty_object")]
    pub sentiment_analysis: Option<SentimentBreakdown>,
    #[serde(serialize_with = "some_or_empty_object")]
    pub engagement_stats: Option<EngagementStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_analyzed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<Uuid>,
}

impl TrendSummary {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            trending_hashtags: Vec::new(),
            platform_distribution: BTreeMap::new(),
            sentiment_analysis: None,
            engagement_stats: None,
            total_analyzed: None,
            analysis_timestamp: None,
            analysis_id: None,
        }
    }
}

fn some_or_empty_object<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(inner) => inner.serialize(serializer),
        None => serde_json::Map::new().serialize(serializer),
    }
}

/// Computes [`TrendSummary`] values for batches of enriched items.
#[derive(Debug, Clone)]
pub struct TrendAggregator {
    keywords: Vec<String>,
    keyword_boost: f64,
    top_hashtags: usize,
}

impl TrendAggregator {
    #[must_use]
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            keywords: config
                .trending_keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            keyword_boost: config.keyword_boost,
            top_hashtags: config.top_hashtags,
        }
    }

    #[must_use]
    pub fn aggregate(&self, items: &[ContentItem]) -> TrendSummary {
        self.aggregate_at(items, Utc::now())
    }

    #[must_use]
    pub fn aggregate_at(&self, items: &[ContentItem], now: DateTime<Utc>) -> TrendSummary {
        if items.is_empty() {
            return TrendSummary::empty();
        }

        let mut platform_distribution: BTreeMap<String, usize> = BTreeMap::new();
        let mut hashtag_counts: Vec<(&str, usize)> = Vec::new();
        let mut hashtag_index: HashMap<&str, usize> = HashMap::new();
        let mut sentiment_distribution: BTreeMap<SentimentLabel, usize> = BTreeMap::new();
        let mut rates: Vec<f64> = Vec::new();

        for item in items {
            *platform_distribution
                .entry(item.platform_key().to_string())
                .or_default() += 1;

            for tag in &item.hashtags {
                if let Some(&idx) = hashtag_index.get(tag.as_str()) {
                    hashtag_counts[idx].1 += 1;
                } else {
                    hashtag_index.insert(tag.as_str(), hashtag_counts.len());
                    hashtag_counts.push((tag.as_str(), 1));
                }
            }

            if let Some(label) = item.sentiment_label() {
                *sentiment_distribution.entry(label).or_default() += 1;
            }

            if let Some(rate) = item.engagement_rate {
                rates.push(rate);
            }
        }

        // Stable: equal counts keep first-encountered order.
        hashtag_counts.sort_by(|a, b| b.1.cmp(&a.1));
        hashtag_counts.truncate(self.top_hashtags);

        let total_items = items.len();
        let trending_hashtags = hashtag_counts
            .into_iter()
            .map(|(tag, count)| HashtagTrend {
                hashtag: tag.to_string(),
                count,
                trend_score: self.hashtag_trend_score(tag, count, total_items),
            })
            .collect();

        let total_analyzed = sentiment_distribution.values().sum();

        tracing::debug!(
            items = total_items,
            platforms = platform_distribution.len(),
            "aggregated trend summary"
        );

        TrendSummary {
            trending_hashtags,
            platform_distribution,
            sentiment_analysis: Some(SentimentBreakdown {
                distribution: sentiment_distribution,
                total_analyzed,
            }),
            engagement_stats: engagement_stats(&rates),
            total_analyzed: Some(total_items),
            analysis_timestamp: Some(now),
            analysis_id: Some(Uuid::new_v4()),
        }
    }

    /// How "hot" a hashtag is across a batch of `total_items`.
    ///
    /// `count / total_items`, boosted when the hashtag contains a trending
    /// keyword, capped at 1.0 and rounded to 3 decimals.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hashtag_trend_score(&self, hashtag: &str, count: usize, total_items: usize) -> f64 {
        if total_items == 0 {
            return 0.0;
        }

        let frequency = count as f64 / total_items as f64;
        let lowered = hashtag.to_lowercase();
        let boost = if self.keywords.iter().any(|k| lowered.contains(k.as_str())) {
            self.keyword_boost
        } else {
            1.0
        };

        round_to((frequency * boost).min(1.0), 3)
    }
}

#[allow(clippy::cast_precision_loss)]
fn engagement_stats(rates: &[f64]) -> Option<EngagementStats> {
    if rates.is_empty() {
        return None;
    }

    let sum: f64 = rates.iter().sum();
    let max = rates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = rates.iter().copied().fold(f64::INFINITY, f64::min);

    Some(EngagementStats {
        average: round_to(sum / rates.len() as f64, 2),
        max: round_to(max, 2),
        min: round_to(min, 2),
        count: rates.len(),
    })
}

/// The `n` highest-scoring items, best first.
///
/// Items without a trending score rank as 0; ties keep input order.
#[must_use]
pub fn top_trending(items: &[ContentItem], n: usize) -> Vec<&ContentItem> {
    let mut ranked: Vec<&ContentItem> = items.iter().collect();
    ranked.sort_by(|a, b| {
        let a = a.trending_score.unwrap_or(0.0);
        let b = b.trending_score.unwrap_or(0.0);
        b.total_cmp(&a)
    });
    ranked.truncate(n);
    ranked
}

/// Items whose platform equals `platform` (case-insensitive).
#[must_use]
pub fn by_platform<'a>(items: &'a [ContentItem], platform: &str) -> Vec<&'a ContentItem> {
    let wanted = Platform::from(platform);
    items
        .iter()
        .filter(|item| item.platform.as_ref() == Some(&wanted))
        .collect()
}

/// Items carrying a sentiment with the given label.
#[must_use]
pub fn by_sentiment(items: &[ContentItem], label: SentimentLabel) -> Vec<&ContentItem> {
    items
        .iter()
        .filter(|item| item.sentiment_label() == Some(label))
        .collect()
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
