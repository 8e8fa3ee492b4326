//! Result materialization.
//!
//! Turns an ordered result list into a serializable view with counts and
//! per-item selection flags. Rendering itself belongs to the callers.

use btools_core::{Blogger, SelectionSet};
use serde::Serialize;

/// Shown instead of an empty list.
pub const NO_RESULTS_PLACEHOLDER: &str = "No bloggers match the current filters";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultItem {
    #[serde(flatten)]
    pub blogger: Blogger,
    /// Price converted to whole USD, `None` when unknown.
    pub usd_price: Option<f64>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub items: Vec<ResultItem>,
    pub total: usize,
    /// Size of the whole selection, including ids not in `items`.
    pub selected_count: usize,
    pub active_filters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

#[must_use]
pub fn materialize(
    results: &[&Blogger],
    selection: &SelectionSet,
    active_filters: Vec<String>,
) -> ResultView {
    let items: Vec<ResultItem> = results
        .iter()
        .map(|b| ResultItem {
            blogger: (*b).clone(),
            usd_price: b.usd_price(),
            selected: selection.contains(&b.id),
        })
        .collect();

    let placeholder = items
        .is_empty()
        .then(|| NO_RESULTS_PLACEHOLDER.to_string());

    ResultView {
        total: items.len(),
        items,
        selected_count: selection.len(),
        active_filters,
        placeholder,
    }
}
