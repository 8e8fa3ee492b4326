//! Predicate builder.
//!
//! Translates a [`FilterCriteria`] into an ordered list of independent
//! predicates, one per active criterion. Inactive criteria produce nothing,
//! so an untouched control can never narrow the result.

use btools_core::{Blogger, FilterCriteria};

use crate::context::QueryContext;
use crate::metrics;

/// The criterion a [`Predicate`] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Platform,
    Category,
    Query,
    FollowersMin,
    FollowersMax,
    AudienceGeo,
    AudienceGender,
    AudienceAge,
    ErMin,
    ErMax,
    ViewsMin,
    PriceMin,
    PriceMax,
    Language,
    Country,
    HasEmail,
    SimilarTo,
    AiQuery,
    LastPostDays,
    ContentTypes,
    BioQuery,
    VerifiedOnly,
    HasPhone,
    PostsMin,
    Growth30Min,
    AqsMin,
}

type Test = Box<dyn Fn(&Blogger) -> bool + Send + Sync>;

/// A boolean test of one criterion against one record.
pub struct Predicate {
    criterion: Criterion,
    test: Test,
}

impl Predicate {
    fn new<F>(criterion: Criterion, test: F) -> Self
    where
        F: Fn(&Blogger) -> bool + Send + Sync + 'static,
    {
        Self {
            criterion,
            test: Box::new(test),
        }
    }

    #[must_use]
    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    #[must_use]
    pub fn matches(&self, blogger: &Blogger) -> bool {
        (self.test)(blogger)
    }
}

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predicate")
            .field("criterion", &self.criterion)
            .finish_non_exhaustive()
    }
}

/// Lower-cased concatenation of the given fields, space separated.
fn haystack(parts: &[&str]) -> String {
    parts.join(" ").to_lowercase()
}

/// Builds one predicate per active criterion.
///
/// `criteria` should already be [`FilterCriteria::normalized`]; anything
/// still present is treated as active.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn build_predicates(criteria: &FilterCriteria, ctx: &QueryContext) -> Vec<Predicate> {
    let mut predicates = Vec::new();

    if let Some(platform) = criteria.platform.clone() {
        predicates.push(Predicate::new(Criterion::Platform, move |b| {
            b.platform == platform
        }));
    }

    if let Some(category) = criteria.category.as_deref().map(str::to_lowercase) {
        predicates.push(Predicate::new(Criterion::Category, move |b| {
            b.category.to_lowercase().contains(&category)
        }));
    }

    if let Some(query) = criteria.query.as_deref().map(str::to_lowercase) {
        predicates.push(Predicate::new(Criterion::Query, move |b| {
            haystack(&[&b.name, &b.category, &b.platform, &b.tags.join(" ")]).contains(&query)
        }));
    }

    if let Some(min_k) = criteria.followers_min_k {
        let min = min_k * 1000.0;
        predicates.push(Predicate::new(Criterion::FollowersMin, move |b| {
            metrics::followers(b) >= min
        }));
    }

    if let Some(max_k) = criteria.followers_max_k {
        let max = max_k * 1000.0;
        predicates.push(Predicate::new(Criterion::FollowersMax, move |b| {
            metrics::followers(b) <= max
        }));
    }

    if let Some(geo) = criteria.audience_geo.as_deref().map(str::to_uppercase) {
        let min_share = criteria.audience_geo_share;
        predicates.push(Predicate::new(Criterion::AudienceGeo, move |b| {
            let slice = &b.audience.geo;
            !slice.value.is_empty()
                && slice.value.to_uppercase().contains(&geo)
                && min_share.is_none_or(|min| slice.share >= min)
        }));
    }

    if let Some(gender) = criteria.audience_gender.as_deref().map(str::to_lowercase) {
        let explicit = criteria.audience_gender_share;
        let dominance = ctx.gender_dominance_min;
        predicates.push(Predicate::new(Criterion::AudienceGender, move |b| {
            let slice = &b.audience.gender;
            slice.value.to_lowercase() == gender
                && slice.share >= dominance
                && explicit.is_none_or(|min| slice.share >= min)
        }));
    }

    if let Some(bucket) = criteria.audience_age_bucket.clone() {
        let min_share = criteria.audience_age_share;
        predicates.push(Predicate::new(Criterion::AudienceAge, move |b| {
            let slice = &b.audience.age;
            slice.value == bucket && min_share.is_none_or(|min| slice.share >= min)
        }));
    }

    if let Some(min) = criteria.er_min {
        predicates.push(Predicate::new(Criterion::ErMin, move |b| {
            metrics::engagement_rate(b) >= min
        }));
    }

    if let Some(max) = criteria.er_max {
        predicates.push(Predicate::new(Criterion::ErMax, move |b| {
            metrics::engagement_rate(b) <= max
        }));
    }

    if let Some(min) = criteria.views_min {
        predicates.push(Predicate::new(Criterion::ViewsMin, move |b| {
            metrics::average_views(b) >= min
        }));
    }

    // Unknown price never excludes a record.
    if let Some(min) = criteria.price_min {
        predicates.push(Predicate::new(Criterion::PriceMin, move |b| {
            metrics::usd_price(b).is_none_or(|p| p >= min)
        }));
    }

    if let Some(max) = criteria.price_max {
        predicates.push(Predicate::new(Criterion::PriceMax, move |b| {
            metrics::usd_price(b).is_none_or(|p| p <= max)
        }));
    }

    if let Some(language) = criteria.language.as_deref().map(str::to_lowercase) {
        predicates.push(Predicate::new(Criterion::Language, move |b| {
            b.language.to_lowercase() == language
        }));
    }

    if let Some(country) = criteria.country.as_deref().map(str::to_uppercase) {
        predicates.push(Predicate::new(Criterion::Country, move |b| {
            b.country.to_uppercase() == country
        }));
    }

    if criteria.has_email {
        predicates.push(Predicate::new(Criterion::HasEmail, Blogger::has_email));
    }

    if let Some(similar) = criteria.similar_to.as_deref().map(str::to_lowercase) {
        predicates.push(Predicate::new(Criterion::SimilarTo, move |b| {
            haystack(&[
                &b.similar_to.join(" "),
                &b.tags.join(" "),
                &b.name,
                &b.category,
                &b.platform,
            ])
            .contains(&similar)
        }));
    }

    if let Some(ai) = criteria.ai_query.as_deref() {
        let words: Vec<String> = ai.split_whitespace().map(str::to_lowercase).collect();
        predicates.push(Predicate::new(Criterion::AiQuery, move |b| {
            let hay = haystack(&[
                &b.name,
                &b.category,
                &b.platform,
                &b.language,
                &b.country,
                &b.tags.join(" "),
                &b.similar_to.join(" "),
            ]);
            words.iter().all(|w| hay.contains(w.as_str()))
        }));
    }

    if let Some(days) = criteria.last_post_days {
        let today = ctx.today;
        predicates.push(Predicate::new(Criterion::LastPostDays, move |b| {
            metrics::days_since_last_post(b, today).is_some_and(|d| d <= i64::from(days))
        }));
    }

    if !criteria.content_types.is_empty() {
        let wanted = criteria.content_types.clone();
        predicates.push(Predicate::new(Criterion::ContentTypes, move |b| {
            wanted.iter().any(|w| {
                b.content_formats
                    .iter()
                    .any(|have| have.eq_ignore_ascii_case(w))
            })
        }));
    }

    if let Some(bio) = criteria.bio_query.as_deref().map(str::to_lowercase) {
        predicates.push(Predicate::new(Criterion::BioQuery, move |b| {
            b.bio.to_lowercase().contains(&bio)
        }));
    }

    if criteria.verified_only {
        predicates.push(Predicate::new(Criterion::VerifiedOnly, |b| b.verified));
    }

    if criteria.has_phone {
        predicates.push(Predicate::new(Criterion::HasPhone, |b| {
            b.phone.as_deref().is_some_and(|p| !p.trim().is_empty())
        }));
    }

    if let Some(min) = criteria.posts_min {
        #[allow(clippy::cast_precision_loss)]
        predicates.push(Predicate::new(Criterion::PostsMin, move |b| {
            b.posts_count as f64 >= min
        }));
    }

    if let Some(min) = criteria.growth30_min {
        predicates.push(Predicate::new(Criterion::Growth30Min, move |b| {
            b.growth_rate >= min
        }));
    }

    if let Some(min) = criteria.aqs_min {
        let today = ctx.today;
        predicates.push(Predicate::new(Criterion::AqsMin, move |b| {
            metrics::audience_quality_score(b, today) >= min
        }));
    }

    predicates
}

#[cfg(test)]
#[path = "predicate_test.rs"]
mod tests;
