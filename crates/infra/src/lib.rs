//! Infrastructure layer: catalog registry + persistence, audit ledger,
//! per-sender sessions, configuration.

pub mod audit;
pub mod config;
pub mod registry;
pub mod session_store;
pub mod store;

pub use audit::{AuditError, AuditLedger, AuditRecord, AuditStatus, InMemoryAuditLedger, JsonLinesAuditLedger};
pub use config::{AppConfig, ConfigError};
pub use registry::{CatalogRepository, Registry, RegistryError};
pub use session_store::SessionStore;
pub use store::{CatalogStore, InMemoryCatalogStore, JsonFileCatalogStore, StoreError};
