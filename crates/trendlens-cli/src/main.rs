mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trendlens_core::SentimentLabel;

#[derive(Debug, Parser)]
#[command(name = "trendlens-cli")]
#[command(about = "Score and summarize collected social-media content")]
struct Cli {
    /// JSON file of collected content; `-` or omitted reads stdin
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Enrich every record and print the enriched batch
    Process {
        /// Write the enriched batch here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Hashtag, platform, sentiment and engagement rollup
    Trends,
    /// Highest trending items
    Top {
        /// Defaults to `TRENDLENS_TOP_LIMIT`
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Enriched items matching a platform and/or sentiment label
    Filter {
        #[arg(long)]
        platform: Option<String>,

        /// positive, negative or neutral
        #[arg(long)]
        sentiment: Option<SentimentLabel>,
    },
    /// Dashboard overview: rollup plus top items
    Summary,
    /// Hashtag topics ranked by engagement, growth and recency
    Topics {
        /// Defaults to `TRENDLENS_TOPIC_LIMIT`
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Per-item sentiment with distribution statistics
    Sentiment,
    /// Engagement leaderboard
    Engagement {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = trendlens_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let scoring = trendlens_core::load_scoring_config(&config.scoring_path)?;
    tracing::debug!(
        env = %config.env,
        scoring = %config.scoring_path.display(),
        "configuration loaded"
    );

    let raw = commands::read_input(cli.input.as_deref())?;
    let items = trendlens_processor::decode_items(&raw)?;
    tracing::info!(items = items.len(), "loaded content batch");

    let ctx = commands::Context::new(&config, &scoring);
    let output = match &cli.command {
        Commands::Process { output } => output.clone(),
        _ => None,
    };
    let result = commands::run(&cli.command, items, &ctx, chrono::Utc::now())?;
    commands::write_output(&result, output.as_deref())?;

    Ok(())
}

#[cfg(test)]
mod tests;
