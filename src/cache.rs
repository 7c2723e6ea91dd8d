//! Memoized base tables
//!
//! Every re-run of the dashboard reads the same snapshot until the cache is
//! invalidated or pointed at a different store.

use std::sync::Arc;

use crate::loader::{LoadedTables, TableSource, load_tables};

#[derive(Debug, Default)]
pub struct TableCache {
    snapshot: Option<Arc<LoadedTables>>,
    loads: usize,
}

impl TableCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached snapshot for this source, loading it on first use
    ///
    /// A failed load is cached as well, so its error message is shown again
    /// on every re-run until [`TableCache::invalidate`] is called.
    pub fn get_or_load(&mut self, source: &dyn TableSource) -> Arc<LoadedTables> {
        let locator = source.locator();
        if let Some(snapshot) = &self.snapshot {
            if snapshot.locator == locator {
                log::debug!("Using cached tables for {locator}");
                return Arc::clone(snapshot);
            }
            log::info!("Data source changed from {} to {locator}", snapshot.locator);
        }

        let snapshot = Arc::new(load_tables(source));
        self.loads += 1;
        self.snapshot = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Drop the snapshot; the next call to `get_or_load` reads the store again
    pub fn invalidate(&mut self) {
        if self.snapshot.take().is_some() {
            log::info!("Invalidated cached tables");
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Number of times the store has been read
    #[must_use]
    pub const fn loads(&self) -> usize {
        self.loads
    }
}
