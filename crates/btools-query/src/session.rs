//! Query session.
//!
//! Owns everything a query needs (catalog snapshot, criteria, selection,
//! context) so callers never share ambient state. Selection changes are
//! handed to a [`SelectionSink`] immediately, one write per change.

use std::convert::Infallible;
use std::sync::Arc;

use btools_core::{Blogger, FilterCriteria, SelectionSet};

use crate::context::QueryContext;
use crate::engine::run_query;
use crate::summary::active_filter_labels;
use crate::view::{materialize, ResultView};

/// Destination for selection writes.
pub trait SelectionSink {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persists the full selection. Called once per effective change.
    ///
    /// # Errors
    ///
    /// Returns the sink's error when the write fails.
    fn persist_selection(&self, selection: &SelectionSet) -> Result<(), Self::Error>;
}

/// Sink that keeps the selection in memory only.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedSelection;

impl SelectionSink for DetachedSelection {
    type Error = Infallible;

    fn persist_selection(&self, _selection: &SelectionSet) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Debug)]
pub struct QuerySession<S = DetachedSelection> {
    catalog: Arc<[Blogger]>,
    criteria: FilterCriteria,
    selection: SelectionSet,
    context: QueryContext,
    sink: S,
}

impl QuerySession<DetachedSelection> {
    #[must_use]
    pub fn new(catalog: impl Into<Arc<[Blogger]>>, context: QueryContext) -> Self {
        Self::with_sink(catalog, context, SelectionSet::new(), DetachedSelection)
    }
}

impl<S: SelectionSink> QuerySession<S> {
    /// Session starting from a previously persisted selection.
    pub fn with_sink(
        catalog: impl Into<Arc<[Blogger]>>,
        context: QueryContext,
        selection: SelectionSet,
        sink: S,
    ) -> Self {
        Self {
            catalog: catalog.into(),
            criteria: FilterCriteria::default(),
            selection,
            context,
            sink,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &[Blogger] {
        &self.catalog
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    #[must_use]
    pub fn context(&self) -> &QueryContext {
        &self.context
    }

    pub fn set_criteria(&mut self, criteria: &FilterCriteria) {
        self.criteria = criteria.normalized();
    }

    pub fn reset_criteria(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    /// Swaps in a new catalog snapshot. The selection is kept as is.
    pub fn replace_catalog(&mut self, catalog: impl Into<Arc<[Blogger]>>) {
        self.catalog = catalog.into();
    }

    pub fn set_context(&mut self, context: QueryContext) {
        self.context = context;
    }

    #[must_use]
    pub fn results(&self) -> Vec<&Blogger> {
        run_query(&self.catalog, &self.criteria, &self.context)
    }

    /// Re-runs the pipeline and materializes the current result view.
    #[must_use]
    pub fn refresh(&self) -> ResultView {
        let results = self.results();
        materialize(&results, &self.selection, active_filter_labels(&self.criteria))
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Blogger> {
        self.catalog.iter().find(|b| b.id == id)
    }

    /// Sets the selection state of one id; returns whether it changed.
    ///
    /// # Errors
    ///
    /// Returns the sink error if persisting the changed selection fails. The
    /// in-memory change is kept either way.
    pub fn toggle(&mut self, id: &str, selected: bool) -> Result<bool, S::Error> {
        let changed = self.selection.set(id, selected);
        if changed {
            self.sink.persist_selection(&self.selection)?;
        }
        Ok(changed)
    }

    /// Selects every record in the current result list; returns how many
    /// were newly added.
    ///
    /// # Errors
    ///
    /// Returns the sink error if persisting fails.
    pub fn select_all_visible(&mut self) -> Result<usize, S::Error> {
        let visible: Vec<String> = self.results().iter().map(|b| b.id.clone()).collect();
        let added = visible
            .into_iter()
            .filter(|id| self.selection.insert(id.clone()))
            .count();
        if added > 0 {
            self.sink.persist_selection(&self.selection)?;
        }
        Ok(added)
    }

    /// # Errors
    ///
    /// Returns the sink error if persisting fails.
    pub fn clear_selection(&mut self) -> Result<(), S::Error> {
        if self.selection.is_empty() {
            return Ok(());
        }
        self.selection.clear();
        self.sink.persist_selection(&self.selection)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
