//! Forgiving field deserializers for [`crate::FilterCriteria`].
//!
//! A value of the wrong shape reads as the field's inactive form instead of
//! failing the whole document, matching how [`crate::CriteriaForm`] treats
//! query strings.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::criteria::{parse_flag, parse_numeric_input, SortDirection, SortKey};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(f64),
    Text(String),
    Flag(bool),
    List(Vec<Loose>),
    Other(IgnoredAny),
}

impl Loose {
    fn number(self) -> Option<f64> {
        match self {
            Loose::Number(n) => Some(n).filter(|n| n.is_finite()),
            Loose::Text(s) => parse_numeric_input(&s),
            _ => None,
        }
    }

    fn text(self) -> Option<String> {
        match self {
            Loose::Text(s) => Some(s),
            Loose::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

fn loose<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Loose>, D::Error> {
    Option::<Loose>::deserialize(deserializer)
}

pub(crate) fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(loose(d)?.and_then(Loose::number))
}

pub(crate) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(loose(d)?.and_then(Loose::text))
}

pub(crate) fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match loose(d)? {
        Some(Loose::Flag(b)) => b,
        Some(Loose::Number(n)) => n != 0.0,
        Some(Loose::Text(s)) => parse_flag(Some(&s)),
        _ => false,
    })
}

/// Whole days; negative, fractional or out-of-range values are inactive.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
pub(crate) fn days<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(loose(d)?
        .and_then(Loose::number)
        .filter(|n| *n >= 0.0 && *n <= f64::from(u32::MAX) && n.trunc() == *n)
        .map(|n| n as u32))
}

pub(crate) fn sort_key<'de, D: Deserializer<'de>>(d: D) -> Result<Option<SortKey>, D::Error> {
    Ok(loose(d)?.and_then(Loose::text).and_then(|s| s.parse().ok()))
}

pub(crate) fn sort_direction<'de, D: Deserializer<'de>>(d: D) -> Result<SortDirection, D::Error> {
    Ok(loose(d)?
        .and_then(Loose::text)
        .map(|s| SortDirection::parse_lenient(&s))
        .unwrap_or_default())
}

/// A list of strings or one comma-separated string.
pub(crate) fn list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match loose(d)? {
        Some(Loose::List(items)) => items.into_iter().filter_map(Loose::text).collect(),
        Some(Loose::Text(s)) => s.split(',').map(|s| s.trim().to_string()).collect(),
        _ => Vec::new(),
    })
}
