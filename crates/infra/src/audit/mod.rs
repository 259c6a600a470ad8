//! Audit ledger: write-only record of accepted Low/Need transactions.
//!
//! Records are appended after the catalog commit they describe. The ledger is
//! an external collaborator; a failed append does not roll back the catalog.

pub mod in_memory;
pub mod json_lines;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shopkeep_core::SenderId;
use shopkeep_inventory::ItemType;

pub use in_memory::InMemoryAuditLedger;
pub use json_lines::JsonLinesAuditLedger;

/// Which command produced a record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    LowStock,
    Need,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub item: String,
    pub quantity: u32,
    pub status: AuditStatus,
    pub item_type: ItemType,
    pub sender: SenderId,
    /// Supplier company name at the time of the transaction.
    pub supplier: Option<String>,
}

impl AuditRecord {
    pub fn new(
        recorded_at: DateTime<Utc>,
        item: impl Into<String>,
        quantity: u32,
        status: AuditStatus,
        item_type: ItemType,
        sender: SenderId,
        supplier: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            recorded_at,
            item: item.into(),
            quantity,
            status,
            item_type,
            sender,
            supplier,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

pub trait AuditLedger: Send + Sync {
    /// Append records in order. Either all records are written or an error is returned.
    fn append(&self, records: &[AuditRecord]) -> Result<(), AuditError>;
}

impl<L> AuditLedger for Arc<L>
where
    L: AuditLedger + ?Sized,
{
    fn append(&self, records: &[AuditRecord]) -> Result<(), AuditError> {
        (**self).append(records)
    }
}
