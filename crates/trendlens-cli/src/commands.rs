//! Command handlers. Each turns a decoded batch into one JSON document.

use std::io::Read;
use std::path::Path;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use serde_json::Value;
use trendlens_core::{AppConfig, ContentItem, ScoringConfig};
use trendlens_processor::{
    by_platform, by_sentiment, engagement_report, sentiment_report, top_trending, DataProcessor,
    TopicRanker,
};

use crate::Commands;

/// Components and limits shared by every command.
pub(crate) struct Context {
    processor: DataProcessor,
    topics: TopicRanker,
    top_limit: usize,
    topic_limit: usize,
}

impl Context {
    pub(crate) fn new(config: &AppConfig, scoring: &ScoringConfig) -> Self {
        Self {
            processor: DataProcessor::new(scoring).with_summary_limit(config.summary_top_limit),
            topics: TopicRanker::new(scoring),
            top_limit: config.top_limit,
            topic_limit: config.topic_limit,
        }
    }
}

/// Read the whole input from `path`, or stdin when absent or `-`.
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read.
pub(crate) fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read input file {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read input from stdin")?;
            Ok(buf)
        }
    }
}

/// Pretty-print `value` to `path`, or stdout when absent.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub(crate) fn write_output(value: &Value, path: Option<&Path>) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    match path {
        Some(p) => {
            std::fs::write(p, format!("{rendered}\n"))
                .with_context(|| format!("failed to write output file {}", p.display()))?;
            tracing::info!(path = %p.display(), "wrote enriched batch");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Execute `command` against `items`.
///
/// # Errors
///
/// Returns an error only if the result cannot be serialized.
pub(crate) fn run(
    command: &Commands,
    items: Vec<ContentItem>,
    ctx: &Context,
    now: DateTime<Utc>,
) -> anyhow::Result<Value> {
    let processor = &ctx.processor;

    let value = match command {
        Commands::Process { .. } => {
            serde_json::to_value(processor.process_content_batch_at(items, now))?
        }
        Commands::Trends => {
            let processed = processor.process_content_batch_at(items, now);
            serde_json::to_value(processor.analyze_trends_at(&processed, now))?
        }
        Commands::Top { limit } => {
            let processed = processor.process_content_batch_at(items, now);
            let top = top_trending(&processed, limit.unwrap_or(ctx.top_limit));
            serde_json::to_value(top)?
        }
        Commands::Filter {
            platform,
            sentiment,
        } => {
            let processed = processor.process_content_batch_at(items, now);
            let on_platform: Vec<ContentItem> = match platform {
                Some(p) => by_platform(&processed, p).into_iter().cloned().collect(),
                None => processed,
            };
            let matched: Vec<&ContentItem> = match sentiment {
                Some(label) => by_sentiment(&on_platform, *label),
                None => on_platform.iter().collect(),
            };
            serde_json::to_value(matched)?
        }
        Commands::Summary => serde_json::to_value(processor.get_content_summary_at(items, now))?,
        Commands::Topics { limit } => {
            let processed = processor.process_content_batch_at(items, now);
            let limit = limit.unwrap_or(ctx.topic_limit);
            serde_json::to_value(ctx.topics.rank_at(&processed, now, limit))?
        }
        Commands::Sentiment => serde_json::to_value(sentiment_report(
            processor.sentiment_scorer(),
            &items,
            now,
        ))?,
        Commands::Engagement { limit } => serde_json::to_value(engagement_report(&items, *limit))?,
    };

    Ok(value)
}
