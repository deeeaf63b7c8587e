use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use trendlens_core::{AppConfig, ContentItem, Environment, ScoringConfig};

use super::*;

#[test]
fn parses_process_command() {
    let cli =
        Cli::try_parse_from(["trendlens-cli", "process"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Process { output: None }));
    assert!(cli.input.is_none());
}

#[test]
fn parses_process_with_output_and_global_input() {
    let cli = Cli::try_parse_from([
        "trendlens-cli",
        "process",
        "--input",
        "raw.json",
        "--output",
        "enriched.json",
    ])
    .unwrap();
    assert_eq!(cli.input, Some(PathBuf::from("raw.json")));
    assert!(matches!(
        cli.command,
        Commands::Process { output: Some(ref p) } if p == &PathBuf::from("enriched.json")
    ));
}

#[test]
fn input_flag_accepts_dash_before_subcommand() {
    let cli = Cli::try_parse_from(["trendlens-cli", "--input", "-", "trends"]).unwrap();
    assert_eq!(cli.input, Some(PathBuf::from("-")));
    assert!(matches!(cli.command, Commands::Trends));
}

#[test]
fn top_limit_is_optional() {
    let cli = Cli::try_parse_from(["trendlens-cli", "top"]).unwrap();
    assert!(matches!(cli.command, Commands::Top { limit: None }));

    let cli = Cli::try_parse_from(["trendlens-cli", "top", "--limit", "3"]).unwrap();
    assert!(matches!(cli.command, Commands::Top { limit: Some(3) }));
}

#[test]
fn filter_parses_sentiment_label() {
    let cli = Cli::try_parse_from([
        "trendlens-cli",
        "filter",
        "--platform",
        "youtube",
        "--sentiment",
        "positive",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Filter {
            platform: Some(ref p),
            sentiment: Some(SentimentLabel::Positive),
        } if p == "youtube"
    ));
}

#[test]
fn filter_rejects_unknown_sentiment_label() {
    assert!(Cli::try_parse_from(["trendlens-cli", "filter", "--sentiment", "ecstatic"]).is_err());
}

#[test]
fn engagement_limit_defaults_to_twenty() {
    let cli = Cli::try_parse_from(["trendlens-cli", "engagement"]).unwrap();
    assert!(matches!(cli.command, Commands::Engagement { limit: 20 }));
}

#[test]
fn command_is_required() {
    assert!(Cli::try_parse_from(["trendlens-cli"]).is_err());
}

#[test]
fn negative_limit_is_rejected() {
    assert!(Cli::try_parse_from(["trendlens-cli", "topics", "--limit", "-1"]).is_err());
}

// ---------------------------------------------------------------------------
// command execution
// ---------------------------------------------------------------------------

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn context() -> commands::Context {
    let config = AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        scoring_path: PathBuf::from("./config/scoring.yaml"),
        top_limit: 2,
        summary_top_limit: 1,
        topic_limit: 20,
    };
    commands::Context::new(&config, &ScoringConfig::default())
}

fn batch() -> Vec<ContentItem> {
    trendlens_processor::decode_items(
        &json!([
            {"id": "a", "platform": "youtube", "title": "Great #tips", "view_count": 100, "like_count": 9},
            {"id": "b", "platform": "instagram", "title": "Awful #tips", "view_count": 100, "like_count": 1},
            {"id": "c", "platform": "youtube", "title": "Plain update", "view_count": 100, "like_count": 5}
        ])
        .to_string(),
    )
    .unwrap()
}

fn ids(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn top_uses_configured_default_limit() {
    let out = commands::run(&Commands::Top { limit: None }, batch(), &context(), now()).unwrap();
    assert_eq!(ids(&out), vec!["a", "c"]);
}

#[test]
fn filter_combines_platform_and_sentiment() {
    let command = Commands::Filter {
        platform: Some("YouTube".to_string()),
        sentiment: Some(SentimentLabel::Positive),
    };
    let out = commands::run(&command, batch(), &context(), now()).unwrap();
    assert_eq!(ids(&out), vec!["a"]);
}

#[test]
fn filter_by_sentiment_alone_spans_platforms() {
    let command = Commands::Filter {
        platform: None,
        sentiment: Some(SentimentLabel::Negative),
    };
    let out = commands::run(&command, batch(), &context(), now()).unwrap();
    assert_eq!(ids(&out), vec!["b"]);
}

#[test]
fn filter_without_criteria_returns_whole_batch() {
    let command = Commands::Filter {
        platform: None,
        sentiment: None,
    };
    let out = commands::run(&command, batch(), &context(), now()).unwrap();
    assert_eq!(ids(&out), vec!["a", "b", "c"]);
}

#[test]
fn summary_respects_summary_limit() {
    let out = commands::run(&Commands::Summary, batch(), &context(), now()).unwrap();
    assert_eq!(out["total_content"], 3);
    assert_eq!(out["top_trending_content"].as_array().unwrap().len(), 1);
}

#[test]
fn topics_see_hashtags_extracted_from_titles() {
    let command = Commands::Topics { limit: None };
    let out = commands::run(&command, batch(), &context(), now()).unwrap();
    assert_eq!(out[0]["hashtag"], "tips");
    assert_eq!(out[0]["volume"], 2);
}

#[test]
fn engagement_report_lists_best_first() {
    let out = commands::run(&Commands::Engagement { limit: 1 }, batch(), &context(), now())
        .unwrap();
    assert_eq!(out["top_performing"][0]["content_id"], "a");
    assert_eq!(out["statistics"]["total_analyzed"], 3);
}

#[test]
fn write_output_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");

    commands::write_output(&json!({"ok": true}), Some(&path)).unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, json!({"ok": true}));
}

#[test]
fn read_input_reports_missing_file() {
    let err = commands::read_input(Some(std::path::Path::new("/nonexistent/trendlens.json")))
        .unwrap_err();
    assert!(err.to_string().contains("failed to read input file"));
}
