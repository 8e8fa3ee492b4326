//! Blogger query engine.
//!
//! Pure, synchronous filtering and ordering over an immutable catalog
//! snapshot. Nothing in this crate performs I/O; persistence of the
//! selection is delegated to a [`SelectionSink`].

pub mod context;
pub mod engine;
pub mod filter;
pub mod metrics;
pub mod predicate;
pub mod session;
pub mod sort;
pub mod summary;
pub mod view;

pub use context::{QueryContext, DEFAULT_GENDER_DOMINANCE_MIN};
pub use engine::run_query;
pub use filter::{apply_predicates, top_engagement_quartile};
pub use predicate::{build_predicates, Criterion, Predicate};
pub use session::{DetachedSelection, QuerySession, SelectionSink};
pub use sort::{comparator, sort_results, Comparator};
pub use summary::active_filter_labels;
pub use view::{materialize, ResultItem, ResultView, NO_RESULTS_PLACEHOLDER};
