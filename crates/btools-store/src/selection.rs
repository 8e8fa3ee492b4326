use btools_core::SelectionSet;
use btools_query::SelectionSink;

use crate::{Store, StoreError};

/// Key holding the ordered list of selected blogger ids.
pub const SELECTION_KEY: &str = "selectedBloggers";

impl Store {
    /// Reads the persisted selection. Missing or unreadable content reads
    /// as an empty selection.
    #[must_use]
    pub fn read_selection(&self) -> SelectionSet {
        match self.read_key::<Vec<String>>(SELECTION_KEY) {
            Ok(Some(ids)) => SelectionSet::from_ids(ids),
            Ok(None) => SelectionSet::new(),
            Err(e) => {
                tracing::warn!(error = %e, "unreadable selection, starting empty");
                SelectionSet::new()
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the document cannot be written.
    pub fn write_selection(&self, selection: &SelectionSet) -> Result<(), StoreError> {
        self.write_key(SELECTION_KEY, selection.ids())?;
        tracing::info!(selected = selection.len(), "selection persisted");
        Ok(())
    }
}

impl SelectionSink for Store {
    type Error = StoreError;

    fn persist_selection(&self, selection: &SelectionSet) -> Result<(), Self::Error> {
        self.write_selection(selection)
    }
}
