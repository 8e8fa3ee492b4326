//! Normalization from [`RawBlogger`] to the canonical [`Blogger`].
//!
//! This runs once per record at ingestion. Alias resolution, currency
//! parsing, clamping and date parsing all happen here so the query engine
//! only ever reads canonical fields.

use std::collections::HashSet;

use btools_core::{Audience, AudienceSlice, Blogger, Currency, Pricing};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::types::{LooseNumber, LooseText, RawBlogger, RawPricing};

/// First alias carrying a value, in priority order.
fn first_present(candidates: &[LooseNumber]) -> Option<f64> {
    candidates.iter().find_map(|n| n.0)
}

/// First alias carrying a non-zero value, in priority order.
fn first_non_zero(candidates: &[LooseNumber]) -> Option<f64> {
    candidates.iter().find_map(|n| n.0.filter(|v| *v != 0.0))
}

fn first_text<'a>(candidates: &[&'a LooseText]) -> Option<&'a str> {
    candidates.iter().find_map(|t| t.get())
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn to_count(value: Option<f64>) -> u64 {
    let v = value.unwrap_or(0.0);
    if v <= 0.0 {
        0
    } else if v >= u64::MAX as f64 {
        u64::MAX
    } else {
        v.round() as u64
    }
}

fn non_negative(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0).max(0.0)
}

fn share(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0).clamp(0.0, 100.0)
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
fn parse_post_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn normalize_pricing(raw: &RawBlogger) -> Option<Pricing> {
    let nested = raw
        .pricing
        .clone()
        .and_then(|v| serde_json::from_value::<RawPricing>(v).ok())
        .unwrap_or_default();

    let amount = first_present(&[nested.integrated, raw.price, raw.integrated_usd])?;
    let currency = first_text(&[&nested.currency, &raw.currency]).unwrap_or("USD");

    Some(Pricing {
        amount: amount.max(0.0),
        currency: Currency::parse(currency),
    })
}

/// Normalizes one raw catalog record.
///
/// `index` is the record's position in the catalog and only matters when the
/// record has no `id`; such records are assigned `row-<index>`.
#[must_use]
pub fn normalize_blogger(raw: RawBlogger, index: usize) -> Blogger {
    let id = raw
        .id
        .get()
        .map_or_else(|| format!("row-{index}"), ToOwned::to_owned);

    let name = first_text(&[&raw.name, &raw.username])
        .unwrap_or_default()
        .to_string();

    let followers = to_count(first_non_zero(&[
        raw.subscribers,
        raw.followers,
        raw.follower_count,
        raw.follower_count_camel,
    ]));

    let engagement_rate = non_negative(first_present(&[
        raw.avg_er,
        raw.er,
        raw.engagement_rate,
        raw.engagement_rate_camel,
    ]));

    let average_views = to_count(first_present(&[
        raw.avg_views,
        raw.avg_views_camel,
        raw.average_views,
        raw.views,
        raw.avg_views_per_post,
    ]));

    let pricing = normalize_pricing(&raw);

    let audience = Audience {
        geo: AudienceSlice {
            value: first_text(&[&raw.audience_geo, &raw.geo, &raw.country])
                .unwrap_or_default()
                .to_uppercase(),
            share: share(first_present(&[raw.audience_geo_share, raw.geo_share])),
        },
        gender: AudienceSlice {
            value: raw
                .audience_gender
                .get()
                .unwrap_or_default()
                .to_lowercase(),
            share: share(raw.audience_gender_share.0),
        },
        age: AudienceSlice {
            value: raw.audience_age_bucket.get().unwrap_or_default().to_string(),
            share: share(raw.audience_age_share.0),
        },
    };

    let language = first_text(&[
        &raw.language,
        &raw.content_language,
        &raw.content_language_camel,
    ])
    .unwrap_or_default()
    .to_string();

    let similar_to = if raw.ai_similar_to.0.is_empty() {
        raw.ai_similar_to_camel.0
    } else {
        raw.ai_similar_to.0
    };

    let content_formats = if raw.content_formats.0.is_empty() {
        raw.content_formats_camel.0
    } else {
        raw.content_formats.0
    };

    let last_post_date =
        first_text(&[&raw.last_post_date, &raw.last_post_date_camel]).and_then(parse_post_date);

    Blogger {
        id,
        name,
        platform: raw.platform.get().unwrap_or_default().to_string(),
        category: first_text(&[&raw.category, &raw.niche])
            .unwrap_or_default()
            .to_string(),
        followers,
        engagement_rate,
        average_views,
        pricing,
        language,
        country: raw.country.get().unwrap_or_default().to_string(),
        audience,
        email: raw.email.get().map(ToOwned::to_owned),
        phone: raw.phone.get().map(ToOwned::to_owned),
        tags: raw.tags.0,
        similar_to,
        avatar: raw.avatar.get().map(ToOwned::to_owned),
        bio: raw.bio.get().unwrap_or_default().to_string(),
        verified: raw.verified.0,
        posts_count: to_count(first_present(&[raw.posts_count, raw.posts_count_camel])),
        growth_rate: first_present(&[raw.growth_rate, raw.growth_rate_camel]).unwrap_or(0.0),
        last_post_date,
        content_formats,
    }
}

/// Normalizes a whole catalog.
///
/// Entries that are not JSON objects are skipped. When two entries share an
/// id the first one wins. Both cases are logged and never fail the load.
#[must_use]
pub fn normalize_catalog(records: Vec<Value>) -> Vec<Blogger> {
    let mut seen = HashSet::new();
    let mut bloggers = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        if !record.is_object() {
            tracing::warn!(index, "skipping catalog entry that is not an object");
            continue;
        }
        let raw = match serde_json::from_value::<RawBlogger>(record) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping unreadable catalog entry");
                continue;
            }
        };
        let blogger = normalize_blogger(raw, index);
        if !seen.insert(blogger.id.clone()) {
            tracing::warn!(index, id = %blogger.id, "skipping duplicate blogger id");
            continue;
        }
        bloggers.push(blogger);
    }

    bloggers
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
