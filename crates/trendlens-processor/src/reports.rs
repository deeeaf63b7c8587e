//! Dashboard report views: per-item sentiment and engagement leaderboards.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use trendlens_core::{ContentItem, SentimentLabel, SentimentResult};

use crate::engagement::{item_engagement_rate, round_to};
use crate::scorer::SentimentScorer;

const SENTIMENT_TITLE_CHARS: usize = 100;
const ENGAGEMENT_TITLE_CHARS: usize = 50;
const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentReportEntry {
    pub content_id: String,
    pub platform: String,
    pub title: String,
    pub sentiment: SentimentResult,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentStatistics {
    pub total_analyzed: usize,
    pub sentiment_distribution: BTreeMap<SentimentLabel, usize>,
    pub average_polarity: f64,
    pub analysis_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentReport {
    pub results: Vec<SentimentReportEntry>,
    pub statistics: SentimentStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementEntry {
    pub content_id: String,
    pub title: String,
    pub platform: String,
    pub author: String,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
    pub engagement_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementStatistics {
    pub total_analyzed: usize,
    pub average_engagement_rate: f64,
    pub highest_engagement: f64,
    pub lowest_engagement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementReport {
    pub top_performing: Vec<EngagementEntry>,
    pub statistics: EngagementStatistics,
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn author_or_unknown(item: &ContentItem) -> String {
    item.author
        .clone()
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

/// Fresh sentiment reading for every item with a title or description.
///
/// Items are re-analyzed even if they already carry a sentiment, so the
/// report reflects the scorer's current lexicon.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sentiment_report(
    scorer: &SentimentScorer,
    items: &[ContentItem],
    now: DateTime<Utc>,
) -> SentimentReport {
    let results: Vec<SentimentReportEntry> = items
        .iter()
        .filter(|item| !item.title.is_empty() || !item.description.is_empty())
        .map(|item| SentimentReportEntry {
            content_id: item.id.clone(),
            platform: item.platform_key().to_string(),
            title: truncate_chars(&item.title, SENTIMENT_TITLE_CHARS),
            sentiment: scorer.analyze(&item.analysis_text()),
            author: author_or_unknown(item),
        })
        .collect();

    let mut distribution = BTreeMap::new();
    for entry in &results {
        *distribution.entry(entry.sentiment.label).or_default() += 1;
    }

    let average_polarity = if results.is_empty() {
        0.0
    } else {
        let sum: f64 = results.iter().map(|r| r.sentiment.polarity).sum();
        round_to(sum / results.len() as f64, 3)
    };

    SentimentReport {
        statistics: SentimentStatistics {
            total_analyzed: results.len(),
            sentiment_distribution: distribution,
            average_polarity,
            analysis_timestamp: now,
        },
        results,
    }
}

/// Items with views, ranked by engagement rate.
///
/// Statistics cover every item with views; `top_performing` holds the best `limit`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement_report(items: &[ContentItem], limit: usize) -> EngagementReport {
    let mut entries: Vec<EngagementEntry> = items
        .iter()
        .filter(|item| item.view_count.unwrap_or(0) > 0)
        .map(|item| EngagementEntry {
            content_id: item.id.clone(),
            title: truncate_chars(&item.title, ENGAGEMENT_TITLE_CHARS),
            platform: item.platform_key().to_string(),
            author: author_or_unknown(item),
            views: item.view_count.unwrap_or(0),
            likes: item.like_count.unwrap_or(0),
            comments: item.comment_count.unwrap_or(0),
            shares: item.share_count.unwrap_or(0),
            engagement_rate: round_to(item_engagement_rate(item), 2),
        })
        .collect();

    entries.sort_by(|a, b| b.engagement_rate.total_cmp(&a.engagement_rate));

    let rates: Vec<f64> = entries.iter().map(|e| e.engagement_rate).collect();
    let statistics = if rates.is_empty() {
        EngagementStatistics {
            total_analyzed: 0,
            average_engagement_rate: 0.0,
            highest_engagement: 0.0,
            lowest_engagement: 0.0,
        }
    } else {
        let sum: f64 = rates.iter().sum();
        EngagementStatistics {
            total_analyzed: rates.len(),
            average_engagement_rate: round_to(sum / rates.len() as f64, 2),
            highest_engagement: rates.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            lowest_engagement: rates.iter().copied().fold(f64::INFINITY, f64::min),
        }
    };

    entries.truncate(limit);

    EngagementReport {
        top_performing: entries,
        statistics,
    }
}
