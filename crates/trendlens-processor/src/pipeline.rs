//! Per-item enrichment and batch orchestration.

use chrono::{DateTime, Utc};
use serde::Serialize;
use trendlens_core::{content_id, ContentItem, ScoringConfig, SentimentResult};

use crate::aggregate::{top_trending, TrendAggregator, TrendSummary};
use crate::engagement::{item_engagement_rate, round_to};
use crate::scorer::SentimentScorer;
use crate::text::{clean_text, extract_hashtags};
use crate::trending::TrendingScorer;

const DEFAULT_SUMMARY_TOP_LIMIT: usize = 5;
const EMPTY_SUMMARY_MESSAGE: &str = "No content available for analysis";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingSummary {
    pub items_processed: usize,
    pub processing_timestamp: DateTime<Utc>,
}

/// Dashboard overview of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentSummary {
    Empty {
        total_content: usize,
        summary: String,
    },
    Full {
        total_content: usize,
        trend_analysis: TrendSummary,
        top_trending_content: Vec<ContentItem>,
        processing_summary: ProcessingSummary,
    },
}

impl ContentSummary {
    #[must_use]
    pub fn total_content(&self) -> usize {
        match self {
            Self::Empty { total_content, .. } | Self::Full { total_content, .. } => *total_content,
        }
    }
}

/// Enriches raw collector records and rolls them up into summaries.
#[derive(Debug, Clone)]
pub struct DataProcessor {
    sentiment: SentimentScorer,
    trending: TrendingScorer,
    aggregator: TrendAggregator,
    summary_top_limit: usize,
}

impl DataProcessor {
    #[must_use]
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            sentiment: SentimentScorer::from_config(config),
            trending: TrendingScorer::new(config),
            aggregator: TrendAggregator::new(config),
            summary_top_limit: DEFAULT_SUMMARY_TOP_LIMIT,
        }
    }

    /// Number of items listed in `top_trending_content` of a summary.
    #[must_use]
    pub fn with_summary_limit(mut self, limit: usize) -> Self {
        self.summary_top_limit = limit;
        self
    }

    #[must_use]
    pub fn sentiment_scorer(&self) -> &SentimentScorer {
        &self.sentiment
    }

    /// Fill in every derived field of `item`.
    ///
    /// Never fails: a sentiment error leaves the neutral reading in place.
    #[must_use]
    pub fn process_single_item(&self, mut item: ContentItem, now: DateTime<Utc>) -> ContentItem {
        item.processed_at = Some(now);

        if item.id.trim().is_empty() {
            item.id = content_id(
                &item.title,
                item.author.as_deref().unwrap_or_default(),
                item.platform_key(),
            );
        }

        if item.view_count.is_some() && item.like_count.is_some() {
            item.engagement_rate = Some(round_to(item_engagement_rate(&item), 2));
        }

        if !item.title.is_empty() {
            item.title_clean = Some(clean_text(&item.title));
            if item.hashtags.is_empty() {
                item.hashtags = extract_hashtags(&item.title);
            }
        }

        if !item.description.is_empty() {
            item.description_clean = Some(clean_text(&item.description));
        }

        let text = item.analysis_text();
        if !text.is_empty() {
            let sentiment = match self.sentiment.try_analyze(&text) {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(item = %item.id, error = %e, "sentiment failed, using neutral");
                    SentimentResult::neutral()
                }
            };
            item.sentiment = Some(sentiment);
        }

        item.trending_score = Some(self.trending.score_at(&item, now));
        item
    }

    /// Enrich every item that has not been processed yet, keeping input order.
    #[must_use]
    pub fn process_content_batch(&self, items: Vec<ContentItem>) -> Vec<ContentItem> {
        self.process_content_batch_at(items, Utc::now())
    }

    #[must_use]
    pub fn process_content_batch_at(
        &self,
        items: Vec<ContentItem>,
        now: DateTime<Utc>,
    ) -> Vec<ContentItem> {
        let total = items.len();
        let mut enriched = 0_usize;

        let processed: Vec<ContentItem> = items
            .into_iter()
            .map(|item| {
                if item.is_processed() {
                    item
                } else {
                    enriched += 1;
                    self.process_single_item(item, now)
                }
            })
            .collect();

        tracing::info!(
            total,
            enriched,
            skipped = total - enriched,
            "processed content batch"
        );
        processed
    }

    #[must_use]
    pub fn analyze_trends(&self, items: &[ContentItem]) -> TrendSummary {
        self.aggregator.aggregate(items)
    }

    #[must_use]
    pub fn analyze_trends_at(&self, items: &[ContentItem], now: DateTime<Utc>) -> TrendSummary {
        self.aggregator.aggregate_at(items, now)
    }

    #[must_use]
    pub fn get_content_summary(&self, items: Vec<ContentItem>) -> ContentSummary {
        self.get_content_summary_at(items, Utc::now())
    }

    /// Enrich the batch, then roll it up with its top trending items.
    #[must_use]
    pub fn get_content_summary_at(
        &self,
        items: Vec<ContentItem>,
        now: DateTime<Utc>,
    ) -> ContentSummary {
        if items.is_empty() {
            return ContentSummary::Empty {
                total_content: 0,
                summary: EMPTY_SUMMARY_MESSAGE.to_string(),
            };
        }

        let processed = self.process_content_batch_at(items, now);
        let trend_analysis = self.aggregator.aggregate_at(&processed, now);
        let top_trending_content = top_trending(&processed, self.summary_top_limit)
            .into_iter()
            .cloned()
            .collect();

        ContentSummary::Full {
            total_content: processed.len(),
            trend_analysis,
            top_trending_content,
            processing_summary: ProcessingSummary {
                items_processed: processed.len(),
                processing_timestamp: now,
            },
        }
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
