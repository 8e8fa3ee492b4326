//! User query criteria for the blogger catalog.
//!
//! [`FilterCriteria`] is a snapshot of every filter and sort control. A
//! criterion left at its empty value (`None`, blank text, `false`, or a zero
//! where zero carries no meaning) is inactive and contributes no predicate;
//! [`FilterCriteria::normalized`] collapses all such values to their
//! canonical inactive form.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{lenient, CoreError};

/// Metric used to order results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Followers,
    Er,
    Views,
    Price,
    Aqs,
    LastPost,
}

impl SortKey {
    /// Parses a sort key, falling back to [`SortKey::Followers`] for
    /// anything unrecognized.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Followers => "followers",
            SortKey::Er => "er",
            SortKey::Views => "views",
            SortKey::Price => "price",
            SortKey::Aqs => "aqs",
            SortKey::LastPost => "last_post",
        }
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "followers" | "subscribers" => Ok(SortKey::Followers),
            "er" | "engagement_rate" => Ok(SortKey::Er),
            "views" | "avg_views" => Ok(SortKey::Views),
            "price" => Ok(SortKey::Price),
            "aqs" => Ok(SortKey::Aqs),
            "last_post" | "last_post_at" => Ok(SortKey::LastPost),
            other => Err(CoreError::InvalidSortKey(other.to_string())),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    /// `"asc"` (any case) is ascending; everything else is descending.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }
}

/// Snapshot of the user's current query.
///
/// Deserialization never rejects a field for its shape: a non-numeric
/// number, unknown sort key or negative day count reads as inactive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Exact platform name, e.g. `"YouTube"`.
    #[serde(deserialize_with = "lenient::text")]
    pub platform: Option<String>,
    /// Case-insensitive substring of the category.
    #[serde(deserialize_with = "lenient::text")]
    pub category: Option<String>,
    /// Case-insensitive substring of name, category, platform and tags.
    #[serde(deserialize_with = "lenient::text")]
    pub query: Option<String>,
    /// Follower bounds in thousands.
    #[serde(deserialize_with = "lenient::number")]
    pub followers_min_k: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub followers_max_k: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub er_min: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub er_max: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub views_min: Option<f64>,
    /// Price bounds in USD.
    #[serde(deserialize_with = "lenient::number")]
    pub price_min: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub price_max: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub audience_geo: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub audience_geo_share: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub audience_gender: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub audience_gender_share: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub audience_age_bucket: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub audience_age_share: Option<f64>,
    /// Content language, compared case-insensitively.
    #[serde(deserialize_with = "lenient::text")]
    pub language: Option<String>,
    /// Creator country, compared case-insensitively.
    #[serde(deserialize_with = "lenient::text")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub has_email: bool,
    /// Lookalike substring.
    #[serde(deserialize_with = "lenient::text")]
    pub similar_to: Option<String>,
    /// Free-text AI query; every word must match.
    #[serde(deserialize_with = "lenient::text")]
    pub ai_query: Option<String>,
    /// Keep only the top quartile by engagement rate.
    #[serde(deserialize_with = "lenient::flag")]
    pub top_er: bool,
    #[serde(deserialize_with = "lenient::sort_key")]
    pub sort_by: Option<SortKey>,
    #[serde(deserialize_with = "lenient::sort_direction")]
    pub sort_dir: SortDirection,
    #[serde(deserialize_with = "lenient::days")]
    pub last_post_days: Option<u32>,
    #[serde(deserialize_with = "lenient::list")]
    pub content_types: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub bio_query: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub verified_only: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub has_phone: bool,
    #[serde(deserialize_with = "lenient::number")]
    pub posts_min: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub growth30_min: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub aqs_min: Option<f64>,
}

fn text(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    finite(value).filter(|v| *v != 0.0)
}

fn positive(value: Option<f64>) -> Option<f64> {
    finite(value).filter(|v| *v > 0.0)
}

impl FilterCriteria {
    /// Returns a copy with every inactive criterion collapsed to its empty
    /// form: blank text becomes `None`, non-finite numbers become `None`,
    /// zero follower bounds and non-positive share thresholds become `None`,
    /// and blank content types are dropped.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            platform: text(self.platform.as_ref()),
            category: text(self.category.as_ref()),
            query: text(self.query.as_ref()),
            followers_min_k: non_zero(self.followers_min_k),
            followers_max_k: non_zero(self.followers_max_k),
            er_min: finite(self.er_min),
            er_max: finite(self.er_max),
            views_min: finite(self.views_min),
            price_min: finite(self.price_min),
            price_max: finite(self.price_max),
            audience_geo: text(self.audience_geo.as_ref()),
            audience_geo_share: positive(self.audience_geo_share),
            audience_gender: text(self.audience_gender.as_ref()),
            audience_gender_share: positive(self.audience_gender_share),
            audience_age_bucket: text(self.audience_age_bucket.as_ref()),
            audience_age_share: positive(self.audience_age_share),
            language: text(self.language.as_ref()),
            country: text(self.country.as_ref()),
            has_email: self.has_email,
            similar_to: text(self.similar_to.as_ref()),
            ai_query: text(self.ai_query.as_ref()),
            top_er: self.top_er,
            sort_by: self.sort_by,
            sort_dir: self.sort_dir,
            last_post_days: self.last_post_days,
            content_types: self
                .content_types
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
            bio_query: text(self.bio_query.as_ref()),
            verified_only: self.verified_only,
            has_phone: self.has_phone,
            posts_min: finite(self.posts_min),
            growth30_min: finite(self.growth30_min),
            aqs_min: finite(self.aqs_min),
        }
    }

    /// Sort key to apply, defaulting to followers.
    #[must_use]
    pub fn effective_sort(&self) -> SortKey {
        self.sort_by.unwrap_or_default()
    }
}

/// Parses a free-form numeric input. Blank or non-numeric input yields
/// `None`, meaning "criterion inactive".
#[must_use]
pub fn parse_numeric_input(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub(crate) fn parse_flag(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "on" | "yes"
        )
    })
}

/// Criteria exactly as a form or query string submits them: every field is
/// raw text. Invalid numbers become inactive criteria instead of errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CriteriaForm {
    pub platform: Option<String>,
    pub category: Option<String>,
    pub query: Option<String>,
    pub followers_min_k: Option<String>,
    pub followers_max_k: Option<String>,
    pub er_min: Option<String>,
    pub er_max: Option<String>,
    pub views_min: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub audience_geo: Option<String>,
    pub audience_geo_share: Option<String>,
    pub audience_gender: Option<String>,
    pub audience_gender_share: Option<String>,
    pub audience_age_bucket: Option<String>,
    pub audience_age_share: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub has_email: Option<String>,
    pub similar_to: Option<String>,
    pub ai_query: Option<String>,
    pub top_er: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub last_post_days: Option<String>,
    /// Comma-separated content formats.
    pub content_types: Option<String>,
    pub bio_query: Option<String>,
    pub verified_only: Option<String>,
    pub has_phone: Option<String>,
    pub posts_min: Option<String>,
    pub growth30_min: Option<String>,
    pub aqs_min: Option<String>,
}

impl CriteriaForm {
    #[must_use]
    pub fn into_criteria(self) -> FilterCriteria {
        let num = |v: Option<String>| v.as_deref().and_then(parse_numeric_input);
        FilterCriteria {
            platform: self.platform,
            category: self.category,
            query: self.query,
            followers_min_k: num(self.followers_min_k),
            followers_max_k: num(self.followers_max_k),
            er_min: num(self.er_min),
            er_max: num(self.er_max),
            views_min: num(self.views_min),
            price_min: num(self.price_min),
            price_max: num(self.price_max),
            audience_geo: self.audience_geo,
            audience_geo_share: num(self.audience_geo_share),
            audience_gender: self.audience_gender,
            audience_gender_share: num(self.audience_gender_share),
            audience_age_bucket: self.audience_age_bucket,
            audience_age_share: num(self.audience_age_share),
            language: self.language,
            country: self.country,
            has_email: parse_flag(self.has_email.as_deref()),
            similar_to: self.similar_to,
            ai_query: self.ai_query,
            top_er: parse_flag(self.top_er.as_deref()),
            sort_by: self
                .sort_by
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(SortKey::parse_lenient),
            sort_dir: self
                .sort_dir
                .as_deref()
                .map(SortDirection::parse_lenient)
                .unwrap_or_default(),
            last_post_days: self
                .last_post_days
                .as_deref()
                .and_then(|v| v.trim().parse::<u32>().ok()),
            content_types: self
                .content_types
                .as_deref()
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_default(),
            bio_query: self.bio_query,
            verified_only: parse_flag(self.verified_only.as_deref()),
            has_phone: parse_flag(self.has_phone.as_deref()),
            posts_min: num(self.posts_min),
            growth30_min: num(self.growth30_min),
            aqs_min: num(self.aqs_min),
        }
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numeric_input_treats_blank_and_garbage_as_inactive() {
        assert_eq!(parse_numeric_input(""), None);
        assert_eq!(parse_numeric_input("   "), None);
        assert_eq!(parse_numeric_input("abc"), None);
        assert_eq!(parse_numeric_input("NaN"), None);
        assert_eq!(parse_numeric_input(" 4.5 "), Some(4.5));
    }

    #[test]
    fn normalized_drops_zero_follower_bounds() {
        let criteria = FilterCriteria {
            followers_min_k: Some(0.0),
            followers_max_k: Some(f64::NAN),
            ..FilterCriteria::default()
        };
        let n = criteria.normalized();
        assert_eq!(n.followers_min_k, None);
        assert_eq!(n.followers_max_k, None);
    }

    #[test]
    fn normalized_keeps_zero_er_bound() {
        let criteria = FilterCriteria {
            er_max: Some(0.0),
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.normalized().er_max, Some(0.0));
    }

    #[test]
    fn normalized_trims_text_and_content_types() {
        let criteria = FilterCriteria {
            category: Some("  ".to_string()),
            platform: Some(" YouTube ".to_string()),
            content_types: vec![" reels ".to_string(), String::new()],
            ..FilterCriteria::default()
        };
        let n = criteria.normalized();
        assert_eq!(n.category, None);
        assert_eq!(n.platform.as_deref(), Some("YouTube"));
        assert_eq!(n.content_types, vec!["reels".to_string()]);
    }

    #[test]
    fn default_criteria_is_already_normalized() {
        let criteria = FilterCriteria::default();
        assert_eq!(criteria.normalized(), criteria);
    }

    #[test]
    fn sort_key_accepts_legacy_names() {
        assert_eq!("subscribers".parse::<SortKey>().unwrap(), SortKey::Followers);
        assert_eq!("avg_views".parse::<SortKey>().unwrap(), SortKey::Views);
        assert_eq!("last_post_at".parse::<SortKey>().unwrap(), SortKey::LastPost);
        assert!("rating".parse::<SortKey>().is_err());
        assert_eq!(SortKey::parse_lenient("rating"), SortKey::Followers);
    }

    #[test]
    fn sort_direction_defaults_to_desc() {
        assert_eq!(SortDirection::parse_lenient("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::parse_lenient("down"), SortDirection::Desc);
        assert_eq!(SortDirection::default(), SortDirection::Desc);
    }

    #[test]
    fn form_converts_invalid_numbers_to_inactive() {
        let form = CriteriaForm {
            followers_min_k: Some("100".to_string()),
            er_min: Some("lots".to_string()),
            has_email: Some("on".to_string()),
            top_er: Some("false".to_string()),
            content_types: Some("reels, shorts,".to_string()),
            sort_by: Some("price".to_string()),
            sort_dir: Some("asc".to_string()),
            ..CriteriaForm::default()
        };
        let criteria = form.into_criteria();
        assert_eq!(criteria.followers_min_k, Some(100.0));
        assert_eq!(criteria.er_min, None);
        assert!(criteria.has_email);
        assert!(!criteria.top_er);
        assert_eq!(
            criteria.content_types,
            vec!["reels".to_string(), "shorts".to_string()]
        );
        assert_eq!(criteria.sort_by, Some(SortKey::Price));
        assert_eq!(criteria.sort_dir, SortDirection::Asc);
    }

    #[test]
    fn criteria_deserializes_from_partial_json() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"platform":"TikTok","sort_by":"er","top_er":true}"#)
                .unwrap();
        assert_eq!(criteria.platform.as_deref(), Some("TikTok"));
        assert_eq!(criteria.sort_by, Some(SortKey::Er));
        assert!(criteria.top_er);
        assert_eq!(criteria.sort_dir, SortDirection::Desc);
    }

    #[test]
    fn criteria_json_with_wrong_shapes_reads_as_inactive() {
        let criteria: FilterCriteria = serde_json::from_str(
            r#"{"er_min":"abc","er_max":" 7.5 ","sort_by":"rating","last_post_days":-3,
                "has_email":"yes","top_er":1,"followers_min_k":{"k":1},
                "platform":null,"content_types":"reels, shorts"}"#,
        )
        .unwrap();
        assert_eq!(criteria.er_min, None);
        assert_eq!(criteria.er_max, Some(7.5));
        assert_eq!(criteria.sort_by, None);
        assert_eq!(criteria.last_post_days, None);
        assert!(criteria.has_email);
        assert!(criteria.top_er);
        assert_eq!(criteria.followers_min_k, None);
        assert_eq!(criteria.platform, None);
        assert_eq!(
            criteria.content_types,
            vec!["reels".to_string(), "shorts".to_string()]
        );
    }

    #[test]
    fn criteria_survive_a_json_round_trip() {
        let criteria = CriteriaForm {
            platform: Some("YouTube".to_string()),
            er_min: Some("2.5".to_string()),
            sort_by: Some("last_post".to_string()),
            sort_dir: Some("asc".to_string()),
            last_post_days: Some("30".to_string()),
            has_email: Some("on".to_string()),
            ..CriteriaForm::default()
        }
        .into_criteria();
        let json = serde_json::to_string(&criteria).unwrap();
        let back: FilterCriteria = serde_json::from_str(&json).unwrap();
        assert_eq!(back, criteria);
    }
}
