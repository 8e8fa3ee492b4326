//! Result ordering.
//!
//! Each sort key maps to a descending comparator. Ascending order is the
//! exact reverse of the descending order, so records a comparator cannot
//! rank (unknown price, no post date) land at the end in descending order
//! and at the start in ascending order.

use std::cmp::Ordering;

use btools_core::{Blogger, SortDirection, SortKey};

use crate::context::QueryContext;
use crate::metrics;

/// Descending comparator over two records.
pub type Comparator = fn(&Blogger, &Blogger, &QueryContext) -> Ordering;

fn by_followers(a: &Blogger, b: &Blogger, _: &QueryContext) -> Ordering {
    b.followers.cmp(&a.followers)
}

fn by_engagement(a: &Blogger, b: &Blogger, _: &QueryContext) -> Ordering {
    metrics::engagement_rate(b).total_cmp(&metrics::engagement_rate(a))
}

fn by_views(a: &Blogger, b: &Blogger, _: &QueryContext) -> Ordering {
    b.average_views.cmp(&a.average_views)
}

fn by_price(a: &Blogger, b: &Blogger, _: &QueryContext) -> Ordering {
    match (metrics::usd_price(a), metrics::usd_price(b)) {
        (Some(pa), Some(pb)) => pb.total_cmp(&pa),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_quality(a: &Blogger, b: &Blogger, ctx: &QueryContext) -> Ordering {
    metrics::audience_quality_score(b, ctx.today)
        .total_cmp(&metrics::audience_quality_score(a, ctx.today))
}

// Most recent first; undated records rank as the oldest.
fn by_last_post(a: &Blogger, b: &Blogger, _: &QueryContext) -> Ordering {
    b.last_post_date.cmp(&a.last_post_date)
}

#[must_use]
pub fn comparator(key: SortKey) -> Comparator {
    match key {
        SortKey::Followers => by_followers,
        SortKey::Er => by_engagement,
        SortKey::Views => by_views,
        SortKey::Price => by_price,
        SortKey::Aqs => by_quality,
        SortKey::LastPost => by_last_post,
    }
}

/// Stable sort by `key`, reversed afterwards for ascending order.
pub fn sort_results(
    records: &mut [&Blogger],
    key: SortKey,
    direction: SortDirection,
    ctx: &QueryContext,
) {
    let cmp = comparator(key);
    records.sort_by(|a, b| cmp(a, b, ctx));
    if direction == SortDirection::Asc {
        records.reverse();
    }
}
