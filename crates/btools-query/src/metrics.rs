//! Canonical metric accessors.
//!
//! Aliases are resolved at ingestion, so these only read canonical fields.
//! They never fail: absent metrics read as zero and an absent price reads
//! as `None` ("unknown").

use btools_core::Blogger;
use chrono::NaiveDate;

#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn followers(b: &Blogger) -> f64 {
    b.followers as f64
}

#[must_use]
pub fn engagement_rate(b: &Blogger) -> f64 {
    b.engagement_rate
}

#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn average_views(b: &Blogger) -> f64 {
    b.average_views as f64
}

/// Integration price in whole USD, `None` when unknown.
#[must_use]
pub fn usd_price(b: &Blogger) -> Option<f64> {
    b.usd_price()
}

/// Whole days between the last post and `today`, `None` without a date.
#[must_use]
pub fn days_since_last_post(b: &Blogger, today: NaiveDate) -> Option<i64> {
    b.last_post_date
        .map(|date| (today - date).num_days().abs())
}

/// Audience Quality Score: engagement rate plus bonuses for verification
/// (+5), 30-day growth above 10 % (+5) and a post within the last week
/// (+3), clamped to `0..=100`.
#[must_use]
pub fn audience_quality_score(b: &Blogger, today: NaiveDate) -> f64 {
    let mut score = b.engagement_rate;
    if b.verified {
        score += 5.0;
    }
    if b.growth_rate > 10.0 {
        score += 5.0;
    }
    if days_since_last_post(b, today).is_some_and(|d| d <= 7) {
        score += 3.0;
    }
    score.clamp(0.0, 100.0)
}
