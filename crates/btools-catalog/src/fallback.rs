//! Placeholder catalog used when the real one cannot be loaded.

use btools_core::Blogger;
use serde_json::json;

use crate::normalize::normalize_catalog;

/// Three demo profiles covering the fields the extended filters use.
///
/// They go through the same normalization as real catalog entries.
#[must_use]
pub fn fallback_bloggers() -> Vec<Blogger> {
    normalize_catalog(vec![
        json!({
            "id": "b101", "name": "TechBro", "platform": "YouTube", "category": "tech",
            "subscribers": 210_000, "er": 4.5, "avg_er": 4.5, "avg_views": 18_000,
            "pricing": {"integrated": 1200, "currency": "USD"},
            "avatar": "/images/avatars/placeholder.png",
            "language": "ru", "country": "RU",
            "audience_geo": "RU", "audience_geo_share": 70,
            "audience_gender": "male", "audience_gender_share": 65,
            "audience_age_bucket": "25-34", "audience_age_share": 40,
            "email": "techbro@example.com",
            "tags": ["gadgets", "reviews"], "ai_similar_to": ["Wylsacom"]
        }),
        json!({
            "id": "b102", "name": "BeautyDaily", "platform": "TikTok", "category": "beauty",
            "subscribers": 580_000, "er": 7.2, "avg_er": 7.2, "avg_views": 30_000,
            "pricing": {"integrated": 850, "currency": "USD"},
            "avatar": "/images/avatars/placeholder.png",
            "language": "ru", "country": "RU",
            "audience_geo": "RU", "audience_geo_share": 80,
            "audience_gender": "female", "audience_gender_share": 75,
            "audience_age_bucket": "18-24", "audience_age_share": 45,
            "email": null,
            "tags": ["makeup", "skincare"], "ai_similar_to": ["Huda Beauty"]
        }),
        json!({
            "id": "b103", "name": "GameRoom", "platform": "YouTube", "category": "gaming",
            "subscribers": 350_000, "er": 3.8, "avg_er": 3.8, "avg_views": 22_000,
            "pricing": {"integrated": 950, "currency": "USD"},
            "avatar": "/images/avatars/placeholder.png",
            "language": "ru", "country": "RU",
            "audience_geo": "RU", "audience_geo_share": 60,
            "audience_gender": "male", "audience_gender_share": 70,
            "audience_age_bucket": "18-24", "audience_age_share": 35,
            "email": "games@example.com",
            "tags": ["gaming", "streams"], "ai_similar_to": ["PewDiePie"]
        }),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_has_three_priced_profiles() {
        let bloggers = fallback_bloggers();
        assert_eq!(bloggers.len(), 3);
        assert!(bloggers.iter().all(|b| b.usd_price().is_some()));
        assert_eq!(bloggers[1].email, None);
    }
}
