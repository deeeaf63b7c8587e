//! Engagement-rate arithmetic.

use trendlens_core::ContentItem;

/// Interactions per view, as a percentage.
///
/// `(likes + comments + shares) / views * 100` when `views > 0`, otherwise
/// exactly `0.0`. Absent counts are zero. Negative counts are not clamped.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement_rate(
    likes: Option<i64>,
    comments: Option<i64>,
    shares: Option<i64>,
    views: Option<i64>,
) -> f64 {
    let views = views.unwrap_or(0);
    if views <= 0 {
        return 0.0;
    }

    let interactions = [likes, comments, shares]
        .into_iter()
        .map(|count| count.unwrap_or(0) as f64)
        .sum::<f64>();

    interactions / views as f64 * 100.0
}

/// Engagement rate over all four count fields of `item`.
#[must_use]
pub fn item_engagement_rate(item: &ContentItem) -> f64 {
    engagement_rate(
        item.like_count,
        item.comment_count,
        item.share_count,
        item.view_count,
    )
}

/// Round half away from zero to `places` decimals.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
