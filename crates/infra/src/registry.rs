//! Single-writer catalog registry (the repository the chat layer mutates through).
//!
//! ## Command Execution Flow
//!
//! ```text
//! Commands
//!   ↓
//! 1. Acquire the writer lock
//!   ↓
//! 2. Clone current state, handle + apply every command on the clone
//!   ↓
//! 3. Persist the clone (write-through)
//!   ↓
//! 4. Swap the clone in as current state
//! ```
//!
//! A batch either commits as a whole or not at all: a domain error on any
//! command, or a failed save, leaves the current state untouched. Because the
//! lock is held across decide-persist-swap, two concurrent reports on the same
//! item both land.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use shopkeep_core::{Aggregate, DomainError};
use shopkeep_inventory::{Catalog, CatalogCommand, CatalogEvent};

use crate::store::{CatalogStore, StoreError};

#[derive(Debug, Error)]
pub enum RegistryError {
    /// A command was rejected by catalog rules (deterministic).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Persisting the new state failed; nothing was applied.
    #[error("persistence failed: {0}")]
    Store(#[from] StoreError),

    /// A previous writer panicked while holding the lock.
    #[error("registry lock poisoned")]
    Poisoned,
}

/// Repository abstraction over the shared catalog.
pub trait CatalogRepository: Send + Sync {
    /// A consistent copy of the current catalog.
    fn snapshot(&self) -> Result<Catalog, RegistryError>;

    /// Atomically execute a batch of commands, in order.
    ///
    /// Returns the committed events. An empty batch is a no-op.
    fn execute(&self, commands: &[CatalogCommand]) -> Result<Vec<CatalogEvent>, RegistryError>;
}

impl<R> CatalogRepository for Arc<R>
where
    R: CatalogRepository + ?Sized,
{
    fn snapshot(&self) -> Result<Catalog, RegistryError> {
        (**self).snapshot()
    }

    fn execute(&self, commands: &[CatalogCommand]) -> Result<Vec<CatalogEvent>, RegistryError> {
        (**self).execute(commands)
    }
}

/// Catalog state guarded by a mutex, written through to a [`CatalogStore`].
#[derive(Debug)]
pub struct Registry<S> {
    state: Mutex<Catalog>,
    store: S,
}

impl<S: CatalogStore> Registry<S> {
    /// Load the persisted catalog and take ownership of the store.
    pub fn load(store: S) -> Result<Self, StoreError> {
        let catalog = store.load()?;
        tracing::info!(
            items = catalog.items().len(),
            suppliers = catalog.suppliers().len(),
            "catalog loaded"
        );
        Ok(Self {
            state: Mutex::new(catalog),
            store,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: CatalogStore> CatalogRepository for Registry<S> {
    fn snapshot(&self) -> Result<Catalog, RegistryError> {
        let state = self.state.lock().map_err(|_| RegistryError::Poisoned)?;
        Ok(state.clone())
    }

    fn execute(&self, commands: &[CatalogCommand]) -> Result<Vec<CatalogEvent>, RegistryError> {
        if commands.is_empty() {
            return Ok(vec![]);
        }

        let mut state = self.state.lock().map_err(|_| RegistryError::Poisoned)?;

        // 1) Decide + apply on a private copy
        let mut next = state.clone();
        let mut committed = Vec::new();
        for command in commands {
            let events = next.execute(command)?;
            committed.extend(events);
        }
        if committed.is_empty() {
            return Ok(committed);
        }

        // 2) Persist before the new state becomes visible
        if let Err(e) = self.store.save(&next) {
            tracing::warn!(error = %e, commands = commands.len(), "catalog save failed; batch discarded");
            return Err(e.into());
        }

        // 3) Swap in
        *state = next;
        for event in &committed {
            tracing::info!(event_type = event.event_type(), version = state.version(), "catalog event committed");
        }

        Ok(committed)
    }
}
