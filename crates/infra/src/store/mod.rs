//! Catalog persistence boundary.
//!
//! The registry loads the whole catalog once at startup and writes it through
//! on every committed mutation. A failed save must surface as an error so the
//! caller can report the mutation as not applied.

pub mod in_memory;
pub mod json_file;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use shopkeep_inventory::Catalog;

pub use in_memory::InMemoryCatalogStore;
pub use json_file::JsonFileCatalogStore;

/// Catalog store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed data in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend refused the write (used by in-memory stores to simulate outages).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Load-all / write-through persistence for the catalog.
pub trait CatalogStore: Send + Sync {
    /// Load the persisted catalog (empty if nothing has been saved yet).
    fn load(&self) -> Result<Catalog, StoreError>;

    /// Persist the full catalog state.
    fn save(&self, catalog: &Catalog) -> Result<(), StoreError>;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn load(&self) -> Result<Catalog, StoreError> {
        (**self).load()
    }

    fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        (**self).save(catalog)
    }
}
