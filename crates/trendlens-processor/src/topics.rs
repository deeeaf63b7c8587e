//! Hashtag topic ranking across a batch.
//!
//! Unlike the per-batch hashtag frequency in [`crate::aggregate`], topics
//! weigh each hashtag by the engagement and age of the items that carry it,
//! over a week-long horizon.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;
use trendlens_core::{ContentItem, PublishedDate, ScoringConfig, TopicConfig};

use crate::engagement::{engagement_rate, round_to};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicTrend {
    pub hashtag: String,
    /// In `[0, 1]`, rounded to 3 decimals.
    pub score: f64,
    /// Number of hashtag occurrences in the batch.
    pub volume: usize,
    /// Mean engagement rate of the carrying items, 2 decimals.
    pub engagement_rate: f64,
    pub platforms: Vec<String>,
    /// Mean item age in hours, 1 decimal.
    pub avg_recency_hours: f64,
}

#[derive(Default)]
struct TopicAccumulator {
    total_engagement: f64,
    count: usize,
    platforms: BTreeSet<String>,
    total_hours: f64,
}

#[derive(Debug, Clone)]
pub struct TopicRanker {
    config: TopicConfig,
}

impl TopicRanker {
    #[must_use]
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            config: config.topics.clone(),
        }
    }

    #[must_use]
    pub fn rank(&self, items: &[ContentItem], limit: usize) -> Vec<TopicTrend> {
        self.rank_at(items, Utc::now(), limit)
    }

    /// Rank hashtags carried by at least `min_items` items, best first.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rank_at(&self, items: &[ContentItem], now: DateTime<Utc>, limit: usize) -> Vec<TopicTrend> {
        let mut order: Vec<&str> = Vec::new();
        let mut stats: HashMap<&str, TopicAccumulator> = HashMap::new();

        for item in items {
            if item.hashtags.is_empty() {
                continue;
            }

            let age_hours = self.age_hours(item, now);
            // Missing or zero views count as a single view.
            let views = match item.view_count {
                None | Some(0) => Some(1),
                other => other,
            };
            let rate = engagement_rate(item.like_count, item.comment_count, None, views);

            for tag in &item.hashtags {
                let acc = stats.entry(tag.as_str()).or_insert_with(|| {
                    order.push(tag.as_str());
                    TopicAccumulator::default()
                });
                acc.total_engagement += rate;
                acc.count += 1;
                acc.platforms.insert(item.platform_key().to_string());
                acc.total_hours += age_hours;
            }
        }

        let mut topics: Vec<TopicTrend> = order
            .into_iter()
            .filter_map(|tag| {
                let acc = stats.remove(tag)?;
                if acc.count < self.config.min_items {
                    return None;
                }

                let count = acc.count as f64;
                let avg_engagement = acc.total_engagement / count;
                let avg_hours = acc.total_hours / count;

                Some(TopicTrend {
                    hashtag: tag.to_string(),
                    score: self.topic_score(avg_engagement, count, avg_hours),
                    volume: acc.count,
                    engagement_rate: round_to(avg_engagement, 2),
                    platforms: acc.platforms.into_iter().collect(),
                    avg_recency_hours: round_to(avg_hours, 1),
                })
            })
            .collect();

        topics.sort_by(|a, b| b.score.total_cmp(&a.score));
        topics.truncate(limit);

        tracing::debug!(topics = topics.len(), "ranked hashtag topics");
        topics
    }

    #[allow(clippy::cast_precision_loss)]
    fn age_hours(&self, item: &ContentItem, now: DateTime<Utc>) -> f64 {
        item.published_date
            .as_ref()
            .and_then(PublishedDate::parse)
            .map_or(self.config.default_age_hours, |at| {
                (now - at).num_milliseconds() as f64 / 3_600_000.0
            })
    }

    /// Engagement, growth and recency blended into `[0, 1]`.
    ///
    /// The engagement term uses the raw percentage, so any topic averaging
    /// a few percent of engagement already saturates the score.
    fn topic_score(&self, avg_engagement: f64, count: f64, avg_hours: f64) -> f64 {
        let cfg = &self.config;
        let growth = (count / cfg.growth_saturation).min(1.0);
        let recency = (1.0 - avg_hours / cfg.recency_horizon_hours).max(0.0);

        let score = avg_engagement * cfg.engagement_weight
            + growth * cfg.growth_weight
            + recency * cfg.recency_weight;

        round_to(score.clamp(0.0, 1.0), 3)
    }
}
