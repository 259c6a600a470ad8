use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use shopkeep_inventory::Catalog;

use super::{CatalogStore, StoreError};

/// In-memory catalog store.
///
/// Intended for tests/dev. `fail_saves(true)` makes every subsequent save
/// fail, which lets callers exercise the not-applied path.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    saved: RwLock<Option<Catalog>>,
    fail_saves: AtomicBool,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing catalog (as if it had been loaded from disk).
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            saved: RwLock::new(Some(catalog)),
            fail_saves: AtomicBool::new(false),
        }
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// The last successfully saved catalog.
    pub fn saved(&self) -> Option<Catalog> {
        self.saved.read().ok()?.clone()
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn load(&self) -> Result<Catalog, StoreError> {
        let saved = self
            .saved
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        Ok(saved.clone().unwrap_or_default())
    }

    fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("save rejected".to_string()));
        }
        let mut saved = self
            .saved
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        *saved = Some(catalog.clone());
        Ok(())
    }
}
