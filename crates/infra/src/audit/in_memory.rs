use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{AuditError, AuditLedger, AuditRecord};

/// In-memory audit ledger for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAuditLedger {
    records: Mutex<Vec<AuditRecord>>,
    fail_appends: AtomicBool,
}

impl InMemoryAuditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(_) => vec![],
        }
    }
}

impl AuditLedger for InMemoryAuditLedger {
    fn append(&self, records: &[AuditRecord]) -> Result<(), AuditError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(AuditError::Unavailable("append rejected".to_string()));
        }
        let mut all = self
            .records
            .lock()
            .map_err(|_| AuditError::Unavailable("lock poisoned".to_string()))?;
        all.extend_from_slice(records);
        Ok(())
    }
}
