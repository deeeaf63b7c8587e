//! Per-item trending score.

use chrono::{DateTime, Utc};
use serde::Serialize;
use trendlens_core::{ContentItem, ScoringConfig, TrendingWeights};

use crate::engagement::round_to;

/// Weighted components of one trending score, before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub engagement: f64,
    pub recency: f64,
    pub hashtags: f64,
    pub sentiment: f64,
    /// Flat bonus applied when `published_date` is present but unparseable.
    pub date_bonus: f64,
    /// Clamped to `[0, 1]` and rounded to 3 decimals.
    pub total: f64,
}

/// Combines engagement, recency, hashtag density and positive sentiment
/// into a score in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct TrendingScorer {
    weights: TrendingWeights,
    engagement_saturation: f64,
    recency_window_hours: f64,
    unparseable_date_bonus: f64,
    hashtag_saturation: f64,
}

enum Published {
    Absent,
    Unparseable,
    At(DateTime<Utc>),
}

impl TrendingScorer {
    #[must_use]
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            weights: config.weights.clone(),
            engagement_saturation: config.engagement_saturation,
            recency_window_hours: config.recency_window_hours,
            unparseable_date_bonus: config.unparseable_date_bonus,
            hashtag_saturation: config.hashtag_saturation,
        }
    }

    /// Score `item` against the current time.
    #[must_use]
    pub fn score(&self, item: &ContentItem) -> f64 {
        self.score_at(item, Utc::now())
    }

    #[must_use]
    pub fn score_at(&self, item: &ContentItem, now: DateTime<Utc>) -> f64 {
        self.breakdown_at(item, now).total
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn breakdown_at(&self, item: &ContentItem, now: DateTime<Utc>) -> ScoreBreakdown {
        let engagement_rate = item.engagement_rate.unwrap_or(0.0);
        let engagement = (engagement_rate / self.engagement_saturation).clamp(0.0, 1.0);

        let published = match &item.published_date {
            None => Published::Absent,
            Some(date) => date.parse().map_or(Published::Unparseable, Published::At),
        };

        // An unparseable date earns a flat bonus; an old or missing one earns nothing.
        let (recency, date_bonus) = match published {
            Published::Absent => (0.0, 0.0),
            Published::Unparseable => (0.0, self.unparseable_date_bonus),
            Published::At(at) => {
                let hours_old = (now - at).num_milliseconds() as f64 / 3_600_000.0;
                if hours_old < self.recency_window_hours {
                    ((1.0 - hours_old / self.recency_window_hours).clamp(0.0, 1.0), 0.0)
                } else {
                    (0.0, 0.0)
                }
            }
        };

        let hashtags = (item.hashtags.len() as f64 / self.hashtag_saturation).min(1.0);

        let sentiment = item
            .sentiment
            .map_or(0.0, |s| s.polarity.clamp(0.0, 1.0));

        let engagement = engagement * self.weights.engagement;
        let recency = recency * self.weights.recency;
        let hashtags = hashtags * self.weights.hashtags;
        let sentiment = sentiment * self.weights.sentiment;

        let raw_total = engagement + recency + hashtags + sentiment + date_bonus;
        let total = round_to(raw_total.clamp(0.0, 1.0), 3);

        ScoreBreakdown {
            engagement,
            recency,
            hashtags,
            sentiment,
            date_bonus,
            total,
        }
    }
}
