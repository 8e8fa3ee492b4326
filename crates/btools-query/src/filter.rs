use btools_core::Blogger;

use crate::metrics;
use crate::predicate::Predicate;

/// Keeps the records that satisfy every predicate, preserving input order.
#[must_use]
pub fn apply_predicates<'a>(records: &'a [Blogger], predicates: &[Predicate]) -> Vec<&'a Blogger> {
    records
        .iter()
        .filter(|b| predicates.iter().all(|p| p.matches(b)))
        .collect()
}

/// Keeps the top quarter of `filtered` by engagement rate.
///
/// Lists of three or fewer records are returned unchanged. Otherwise the
/// threshold is the engagement rate at position `ceil(len / 4)` of the
/// descending order and every record at or above it survives, so ties at
/// the boundary are all kept. Input order is preserved.
#[must_use]
pub fn top_engagement_quartile(filtered: Vec<&Blogger>) -> Vec<&Blogger> {
    if filtered.len() <= 3 {
        return filtered;
    }

    let mut rates: Vec<f64> = filtered.iter().map(|b| metrics::engagement_rate(b)).collect();
    rates.sort_by(|a, b| b.total_cmp(a));
    let cutoff = filtered.len().div_ceil(4);
    let threshold = rates[cutoff - 1];

    filtered
        .into_iter()
        .filter(|b| metrics::engagement_rate(b) >= threshold)
        .collect()
}
