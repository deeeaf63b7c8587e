//! End-to-end tests: collector JSON in, enriched records and summaries out.
//!
//! Every test pins `now` so recency and timestamps are deterministic.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use trendlens_core::{ScoringConfig, SentimentLabel};
use trendlens_processor::{
    by_platform, by_sentiment, decode_items, engagement_report, sentiment_report, top_trending,
    ContentSummary, DataProcessor, TopicRanker,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn processor() -> DataProcessor {
    DataProcessor::new(&ScoringConfig::default())
}

/// A mixed batch in the shapes the collectors actually emit.
fn collector_batch() -> Value {
    json!([
        {
            "id": "yt-1",
            "platform": "youtube",
            "title": "Amazing street food tour #food #travel",
            "description": "Best noodles in town https://youtu.be/x",
            "author": "eater",
            "published_date": "2024-06-01T06:00:00Z",
            "view_count": 1000,
            "like_count": 80,
            "comment_count": 15,
            "share_count": 5,
            "thumbnail_url": "https://img.example/1.jpg"
        },
        {
            "platform": "Instagram",
            "title": "Rainy day vibes",
            "description": "Feeling sad today #mood #travel",
            "author": "wanderer",
            "published_date": "2024-05-30 08:15:00",
            "view_count": "400",
            "like_count": 12.9,
            "hashtags": "[\"mood\", \"travel\"]"
        },
        {
            "id": "yt-3",
            "platform": "youtube",
            "title": "",
            "description": "",
            "published_date": "yesterday-ish",
            "hashtags": 7
        }
    ])
}

#[test]
fn decodes_and_enriches_a_mixed_batch() {
    let items = decode_items(&collector_batch().to_string()).expect("decode batch");
    assert_eq!(items.len(), 3);

    let out = processor().process_content_batch_at(items, now());

    let food = &out[0];
    assert_eq!(food.id, "yt-1");
    assert_eq!(food.engagement_rate, Some(10.0));
    assert_eq!(food.hashtags, vec!["food", "travel"]);
    assert_eq!(food.sentiment_label(), Some(SentimentLabel::Positive));
    assert_eq!(
        food.description_clean.as_deref(),
        Some("Best noodles in town")
    );
    assert!(food.trending_score.unwrap() > 0.5);

    let rainy = &out[1];
    assert_eq!(rainy.id.len(), 64);
    assert_eq!(rainy.platform_key(), "instagram");
    assert_eq!(rainy.view_count, Some(400));
    assert_eq!(rainy.like_count, Some(12));
    assert_eq!(rainy.engagement_rate, Some(3.0));
    assert_eq!(rainy.hashtags, vec!["mood", "travel"]);
    assert_eq!(rainy.sentiment_label(), Some(SentimentLabel::Negative));

    let blank = &out[2];
    assert!(blank.hashtags.is_empty());
    assert!(blank.sentiment.is_none());
    // Unparseable date earns only the flat bonus.
    assert_eq!(blank.trending_score, Some(0.15));
}

#[test]
fn enriched_records_keep_unknown_fields_and_gain_derived_ones() {
    let items = decode_items(&collector_batch().to_string()).expect("decode batch");
    let out = processor().process_content_batch_at(items, now());
    let value = serde_json::to_value(&out[0]).expect("serialize item");

    assert_eq!(value["thumbnail_url"], "https://img.example/1.jpg");
    for field in [
        "title_clean",
        "description_clean",
        "sentiment",
        "engagement_rate",
        "trending_score",
        "processed_at",
    ] {
        assert!(value.get(field).is_some(), "missing {field}");
    }
    assert_eq!(value["sentiment"]["label"], "positive");
}

#[test]
fn enriched_output_round_trips_through_json_without_reprocessing() {
    let items = decode_items(&collector_batch().to_string()).expect("decode batch");
    let once = processor().process_content_batch_at(items, now());

    let json = serde_json::to_string(&once).expect("serialize batch");
    let reloaded = decode_items(&json).expect("decode enriched batch");
    assert!(reloaded.iter().all(|item| item.is_processed()));

    let later = now() + chrono::Duration::hours(12);
    let twice = processor().process_content_batch_at(reloaded, later);
    assert_eq!(
        once.iter().map(|i| i.trending_score).collect::<Vec<_>>(),
        twice.iter().map(|i| i.trending_score).collect::<Vec<_>>()
    );
    assert!(twice.iter().all(|i| i.processed_at == Some(now())));
}

#[test]
fn unreadable_processed_at_is_processed_again() {
    let items = decode_items(
        &json!([
            {"id": "null-stamp", "title": "Great", "processed_at": null, "trending_score": 0.99},
            {"id": "bad-stamp", "title": "Great", "processed_at": "soon", "trending_score": 0.99},
            {"id": "good-stamp", "title": "Great", "processed_at": "2024-05-01T00:00:00Z", "trending_score": 0.99}
        ])
        .to_string(),
    )
    .expect("decode batch");

    let out = processor().process_content_batch_at(items, now());

    assert_eq!(out[0].processed_at, Some(now()));
    assert_eq!(out[1].processed_at, Some(now()));
    assert!(out[0].trending_score < Some(0.99));
    assert_eq!(
        out[2].processed_at,
        Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(out[2].trending_score, Some(0.99));
}

#[test]
fn viral_hashtag_summary_from_json() {
    let items = decode_items(
        &json!([
            {"platform": "youtube", "hashtags": ["viral", "news"], "engagement_rate": 12.0,
             "processed_at": "2024-06-01T11:00:00Z"},
            {"platform": "instagram", "hashtags": ["viral"], "engagement_rate": 2.0,
             "processed_at": "2024-06-01T11:00:00Z"}
        ])
        .to_string(),
    )
    .expect("decode batch");

    let summary = processor().analyze_trends_at(&items, now());
    let viral = &summary.trending_hashtags[0];
    assert_eq!(viral.hashtag, "viral");
    assert_eq!(viral.count, 2);
    assert!((viral.trend_score - 1.0).abs() < 1e-9);

    let stats = summary.engagement_stats.expect("engagement stats");
    assert!((stats.average - 7.0).abs() < 1e-9);
    assert!((stats.max - 12.0).abs() < 1e-9);
    assert!((stats.min - 2.0).abs() < 1e-9);
}

#[test]
fn empty_batch_summaries_are_well_defined() {
    let processor = processor();
    let value = serde_json::to_value(processor.analyze_trends_at(&[], now())).unwrap();
    assert_eq!(
        value,
        json!({
            "trending_hashtags": [],
            "platform_distribution": {},
            "sentiment_analysis": {},
            "engagement_stats": {}
        })
    );

    let summary = processor.get_content_summary_at(decode_items("[]").unwrap(), now());
    assert!(matches!(summary, ContentSummary::Empty { total_content: 0, .. }));
}

#[test]
fn content_summary_from_raw_json() {
    let items = decode_items(&collector_batch().to_string()).expect("decode batch");
    let summary = processor().get_content_summary_at(items, now());
    let value = serde_json::to_value(&summary).expect("serialize summary");

    assert_eq!(value["total_content"], 3);
    assert_eq!(value["trend_analysis"]["platform_distribution"]["youtube"], 2);
    assert_eq!(value["trend_analysis"]["trending_hashtags"][0]["hashtag"], "travel");
    assert_eq!(value["top_trending_content"][0]["id"], "yt-1");
    assert_eq!(value["processing_summary"]["items_processed"], 3);
}

#[test]
fn ranking_filters_and_reports_over_enriched_batch() {
    let items = decode_items(&collector_batch().to_string()).expect("decode batch");
    let out = processor().process_content_batch_at(items, now());

    let top = top_trending(&out, 1);
    assert_eq!(top[0].id, "yt-1");

    assert_eq!(by_platform(&out, "YOUTUBE").len(), 2);
    assert_eq!(by_sentiment(&out, SentimentLabel::Negative).len(), 1);

    let sentiment = sentiment_report(processor().sentiment_scorer(), &out, now());
    assert_eq!(sentiment.statistics.total_analyzed, 2);

    let engagement = engagement_report(&out, 20);
    assert_eq!(engagement.top_performing[0].content_id, "yt-1");
    assert_eq!(engagement.statistics.total_analyzed, 2);

    let topics = TopicRanker::new(&ScoringConfig::default()).rank_at(&out, now(), 20);
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].hashtag, "travel");
    assert_eq!(topics[0].platforms, vec!["instagram", "youtube"]);
}
