//! Human-readable "active filter" chips, one per active criterion.

use btools_core::{FilterCriteria, SortDirection};

fn with_share(label: &str, value: &str, share: Option<f64>) -> String {
    match share {
        Some(share) => format!("{label}: {value} ≥ {share}%"),
        None => format!("{label}: {value}"),
    }
}

/// Labels for every active criterion of `criteria`, in a stable order.
///
/// The criteria are normalized first, so blank or non-finite inputs never
/// produce a chip. The sort chip only appears when a sort key was chosen
/// explicitly.
#[must_use]
pub fn active_filter_labels(criteria: &FilterCriteria) -> Vec<String> {
    let c = criteria.normalized();
    let mut chips = Vec::new();

    if let Some(platform) = &c.platform {
        chips.push(format!("Platform: {platform}"));
    }
    if let Some(category) = &c.category {
        chips.push(format!("Category: {category}"));
    }
    if let Some(query) = &c.query {
        chips.push(format!("Search: {query}"));
    }
    if let Some(min) = c.followers_min_k {
        chips.push(format!("Followers ≥ {min}k"));
    }
    if let Some(max) = c.followers_max_k {
        chips.push(format!("Followers ≤ {max}k"));
    }
    if let Some(min) = c.er_min {
        chips.push(format!("ER ≥ {min}%"));
    }
    if let Some(max) = c.er_max {
        chips.push(format!("ER ≤ {max}%"));
    }
    if let Some(min) = c.views_min {
        chips.push(format!("Views ≥ {min}"));
    }
    if let Some(min) = c.price_min {
        chips.push(format!("Price ≥ ${min}"));
    }
    if let Some(max) = c.price_max {
        chips.push(format!("Price ≤ ${max}"));
    }
    if let Some(geo) = &c.audience_geo {
        chips.push(with_share("Audience geo", geo, c.audience_geo_share));
    }
    if let Some(gender) = &c.audience_gender {
        chips.push(with_share("Audience gender", gender, c.audience_gender_share));
    }
    if let Some(age) = &c.audience_age_bucket {
        chips.push(with_share("Audience age", age, c.audience_age_share));
    }
    if let Some(language) = &c.language {
        chips.push(format!("Language: {language}"));
    }
    if let Some(country) = &c.country {
        chips.push(format!("Country: {country}"));
    }
    if c.has_email {
        chips.push("Only with email".to_string());
    }
    if let Some(similar) = &c.similar_to {
        chips.push(format!("Similar to: {similar}"));
    }
    if let Some(ai) = &c.ai_query {
        chips.push(format!("AI: {ai}"));
    }
    if c.top_er {
        chips.push("Top 25% ER".to_string());
    }
    if let Some(days) = c.last_post_days {
        chips.push(format!("Posted within {days} days"));
    }
    if !c.content_types.is_empty() {
        chips.push(format!("Formats: {}", c.content_types.join(", ")));
    }
    if let Some(bio) = &c.bio_query {
        chips.push(format!("Bio: {bio}"));
    }
    if c.verified_only {
        chips.push("Verified only".to_string());
    }
    if c.has_phone {
        chips.push("Only with phone".to_string());
    }
    if let Some(min) = c.posts_min {
        chips.push(format!("Posts ≥ {min}"));
    }
    if let Some(min) = c.growth30_min {
        chips.push(format!("Growth 30d ≥ {min}%"));
    }
    if let Some(min) = c.aqs_min {
        chips.push(format!("AQS ≥ {min}"));
    }
    if let Some(key) = c.sort_by {
        let arrow = match c.sort_dir {
            SortDirection::Desc => '↓',
            SortDirection::Asc => '↑',
        };
        chips.push(format!("Sort: {key} {arrow}"));
    }

    chips
}
