//! Enrichment and trend scoring for collected social-media content.
//!
//! Each content item is cleaned, scored for sentiment with a lexicon,
//! given an engagement rate and a bounded trending score. Batches are then
//! rolled up into hashtag, platform, sentiment and engagement summaries.
//! Every per-item failure degrades to a neutral default; nothing here aborts
//! a batch.

pub mod aggregate;
pub mod engagement;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod reports;
pub mod scorer;
pub mod text;
pub mod topics;
pub mod trending;

pub use aggregate::{
    by_platform, by_sentiment, top_trending, EngagementStats, HashtagTrend, SentimentBreakdown,
    TrendAggregator, TrendSummary,
};
pub use engagement::{engagement_rate, round_to};
pub use error::ProcessorError;
pub use input::decode_items;
pub use pipeline::{ContentSummary, DataProcessor};
pub use reports::{engagement_report, sentiment_report, EngagementReport, SentimentReport};
pub use scorer::SentimentScorer;
pub use text::{clean_text, extract_hashtags, extract_mentions};
pub use topics::{TopicRanker, TopicTrend};
pub use trending::{ScoreBreakdown, TrendingScorer};
