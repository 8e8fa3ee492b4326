//! Raw catalog shapes.
//!
//! The catalog is hand-maintained JSON assembled from several exports, so
//! the same metric shows up under different keys and numbers sometimes
//! arrive as strings. Every field here is optional and lenient; resolving
//! aliases into a canonical [`btools_core::Blogger`] is the job of
//! [`crate::normalize`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A number that may be encoded as a JSON number or a numeric string.
/// Anything else (including non-finite values) reads as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LooseNumber(pub Option<f64>);

impl<'de> Deserialize<'de> for LooseNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => btools_core::parse_numeric_input(&s),
            _ => None,
        };
        Ok(Self(number.filter(|n| n.is_finite())))
    }
}

/// Text that may be encoded as a string, number, or boolean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LooseText(pub Option<String>);

impl LooseText {
    /// Trimmed, non-empty value.
    #[must_use]
    pub fn get(&self) -> Option<&str> {
        self.0.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

impl<'de> Deserialize<'de> for LooseText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self(match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }))
    }
}

/// A list of strings; also accepts a single comma-separated string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LooseList(pub Vec<String>);

impl<'de> Deserialize<'de> for LooseList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let items = match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            Value::String(s) => s.split(',').map(ToOwned::to_owned).collect(),
            _ => Vec::new(),
        };
        Ok(Self(
            items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        ))
    }
}

/// A flag encoded as a boolean, `"yes"`/`"true"`/`"1"`, or a non-zero number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LooseFlag(pub bool);

impl<'de> Deserialize<'de> for LooseFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self(match value {
            Value::Bool(b) => b,
            Value::String(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "yes" | "true" | "1"
            ),
            Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            _ => false,
        }))
    }
}

/// Nested `pricing` object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPricing {
    pub integrated: LooseNumber,
    pub currency: LooseText,
}

/// One catalog entry exactly as published, aliases and all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawBlogger {
    pub id: LooseText,
    pub name: LooseText,
    pub username: LooseText,
    pub platform: LooseText,
    pub category: LooseText,
    pub niche: LooseText,

    pub subscribers: LooseNumber,
    pub followers: LooseNumber,
    pub follower_count: LooseNumber,
    #[serde(rename = "followerCount")]
    pub follower_count_camel: LooseNumber,

    pub avg_er: LooseNumber,
    pub er: LooseNumber,
    pub engagement_rate: LooseNumber,
    #[serde(rename = "engagementRate")]
    pub engagement_rate_camel: LooseNumber,

    pub avg_views: LooseNumber,
    #[serde(rename = "avgViews")]
    pub avg_views_camel: LooseNumber,
    #[serde(rename = "averageViews")]
    pub average_views: LooseNumber,
    pub views: LooseNumber,
    pub avg_views_per_post: LooseNumber,

    /// Usually a [`RawPricing`] object; kept raw so a malformed value only
    /// loses the price, not the whole record.
    pub pricing: Option<Value>,
    pub price: LooseNumber,
    pub integrated_usd: LooseNumber,
    pub currency: LooseText,

    pub language: LooseText,
    pub content_language: LooseText,
    #[serde(rename = "contentLanguage")]
    pub content_language_camel: LooseText,
    pub country: LooseText,

    pub audience_geo: LooseText,
    pub geo: LooseText,
    pub audience_geo_share: LooseNumber,
    pub geo_share: LooseNumber,
    pub audience_gender: LooseText,
    pub audience_gender_share: LooseNumber,
    pub audience_age_bucket: LooseText,
    pub audience_age_share: LooseNumber,

    pub email: LooseText,
    pub phone: LooseText,
    pub tags: LooseList,
    pub ai_similar_to: LooseList,
    #[serde(rename = "aiSimilarTo")]
    pub ai_similar_to_camel: LooseList,
    pub avatar: LooseText,

    pub bio: LooseText,
    pub verified: LooseFlag,
    pub posts_count: LooseNumber,
    #[serde(rename = "postsCount")]
    pub posts_count_camel: LooseNumber,
    pub growth_rate: LooseNumber,
    #[serde(rename = "growthRate")]
    pub growth_rate_camel: LooseNumber,
    pub last_post_date: LooseText,
    #[serde(rename = "lastPostDate")]
    pub last_post_date_camel: LooseText,
    pub content_formats: LooseList,
    #[serde(rename = "contentFormats")]
    pub content_formats_camel: LooseList,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_number_accepts_numeric_strings() {
        let raw: RawBlogger =
            serde_json::from_str(r#"{"subscribers":"210000","er":4.5,"avg_views":"n/a"}"#)
                .unwrap();
        assert_eq!(raw.subscribers.0, Some(210_000.0));
        assert_eq!(raw.er.0, Some(4.5));
        assert_eq!(raw.avg_views.0, None);
    }

    #[test]
    fn loose_text_stringifies_numeric_ids() {
        let raw: RawBlogger = serde_json::from_str(r#"{"id":101}"#).unwrap();
        assert_eq!(raw.id.get(), Some("101"));
    }

    #[test]
    fn loose_list_accepts_comma_string_and_skips_junk() {
        let raw: RawBlogger =
            serde_json::from_str(r#"{"tags":"gadgets, reviews,","ai_similar_to":["A",null,7]}"#)
                .unwrap();
        assert_eq!(raw.tags.0, vec!["gadgets".to_string(), "reviews".to_string()]);
        assert_eq!(raw.ai_similar_to.0, vec!["A".to_string(), "7".to_string()]);
    }

    #[test]
    fn loose_flag_understands_yes() {
        let raw: RawBlogger = serde_json::from_str(r#"{"verified":"yes"}"#).unwrap();
        assert!(raw.verified.0);
        let raw: RawBlogger = serde_json::from_str(r#"{"verified":"no"}"#).unwrap();
        assert!(!raw.verified.0);
    }

    #[test]
    fn nulls_read_as_absent() {
        let raw: RawBlogger =
            serde_json::from_str(r#"{"email":null,"pricing":null,"followers":null}"#).unwrap();
        assert_eq!(raw.email.get(), None);
        assert!(raw.pricing.is_none());
        assert_eq!(raw.followers.0, None);
    }
}
