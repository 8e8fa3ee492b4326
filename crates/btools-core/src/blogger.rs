use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Settlement currency of a blogger's integration price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Currency {
    Usd,
    Rub,
    Eur,
    /// Any other ISO code; converted 1:1.
    Other(String),
}

impl Currency {
    /// Parses a currency code case-insensitively. Empty input means USD.
    #[must_use]
    pub fn parse(code: &str) -> Self {
        let code = code.trim().to_ascii_uppercase();
        match code.as_str() {
            "" | "USD" => Currency::Usd,
            "RUB" => Currency::Rub,
            "EUR" => Currency::Eur,
            _ => Currency::Other(code),
        }
    }

    /// Fixed conversion rate into USD.
    #[must_use]
    pub fn usd_rate(&self) -> f64 {
        match self {
            Currency::Usd | Currency::Other(_) => 1.0,
            Currency::Rub => 0.012,
            Currency::Eur => 1.07,
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Currency::Usd => "USD",
            Currency::Rub => "RUB",
            Currency::Eur => "EUR",
            Currency::Other(code) => code,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl From<String> for Currency {
    fn from(value: String) -> Self {
        Currency::parse(&value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.code().to_string()
    }
}

/// Integration price in its original currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub amount: f64,
    pub currency: Currency,
}

impl Pricing {
    /// Price converted to whole US dollars.
    #[must_use]
    pub fn usd(&self) -> f64 {
        (self.amount * self.currency.usd_rate()).round()
    }
}

/// Dominant audience value (e.g. `"RU"`, `"female"`, `"18-24"`) and the
/// percentage of the audience it covers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudienceSlice {
    pub value: String,
    /// Share in percent, `0..=100`. Zero when the catalog did not report one.
    pub share: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Audience {
    /// Upper-cased country code or region.
    pub geo: AudienceSlice,
    /// Lower-cased `"male"` / `"female"`.
    pub gender: AudienceSlice,
    pub age: AudienceSlice,
}

/// Canonical influencer profile.
///
/// Produced once per catalog record by the ingestion adapter; every field
/// alias the raw catalog uses has already been resolved, and numeric metrics
/// are finite and non-negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blogger {
    pub id: String,
    pub name: String,
    pub platform: String,
    pub category: String,
    pub followers: u64,
    /// Engagement rate in percent.
    pub engagement_rate: f64,
    pub average_views: u64,
    pub pricing: Option<Pricing>,
    pub language: String,
    pub country: String,
    pub audience: Audience,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub tags: Vec<String>,
    /// Lookalike creators used for "similar to" matching.
    pub similar_to: Vec<String>,
    pub avatar: Option<String>,
    pub bio: String,
    pub verified: bool,
    pub posts_count: u64,
    /// Follower growth over the last 30 days, in percent.
    pub growth_rate: f64,
    pub last_post_date: Option<NaiveDate>,
    pub content_formats: Vec<String>,
}

impl Blogger {
    /// Price in USD, or `None` when the catalog carries no price.
    #[must_use]
    pub fn usd_price(&self) -> Option<f64> {
        self.pricing.as_ref().map(Pricing::usd)
    }

    #[must_use]
    pub fn has_email(&self) -> bool {
        self.email.as_deref().is_some_and(|e| !e.trim().is_empty())
    }
}
