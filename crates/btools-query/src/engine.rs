use btools_core::{Blogger, FilterCriteria};

use crate::context::QueryContext;
use crate::filter::{apply_predicates, top_engagement_quartile};
use crate::predicate::build_predicates;
use crate::sort::sort_results;

/// Runs the full pipeline: normalize, filter, optional top-ER quartile, sort.
///
/// Total over its inputs. An empty catalog or criteria that match nothing
/// yield an empty list.
#[must_use]
pub fn run_query<'a>(
    records: &'a [Blogger],
    criteria: &FilterCriteria,
    ctx: &QueryContext,
) -> Vec<&'a Blogger> {
    let criteria = criteria.normalized();
    let predicates = build_predicates(&criteria, ctx);

    let mut results = apply_predicates(records, &predicates);
    if criteria.top_er {
        results = top_engagement_quartile(results);
    }
    sort_results(&mut results, criteria.effective_sort(), criteria.sort_dir, ctx);

    tracing::debug!(
        catalog = records.len(),
        predicates = predicates.len(),
        top_er = criteria.top_er,
        results = results.len(),
        "query evaluated"
    );

    results
}
