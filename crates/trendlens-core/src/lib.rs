//! Shared data model and configuration for trendlens.
//!
//! Content records arrive from external collectors as loosely-typed JSON.
//! [`ContentItem`] decodes them leniently so that a malformed field degrades
//! to its empty value instead of rejecting the whole record.

pub mod app_config;
pub mod config;
pub mod content;
pub mod error;
pub mod scoring;

mod de;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use content::{
    content_id, parse_timestamp, ContentItem, Platform, PublishedDate, SentimentLabel,
    SentimentResult,
};
pub use error::ConfigError;
pub use scoring::{load_scoring_config, LexiconEntry, ScoringConfig, TopicConfig, TrendingWeights};
