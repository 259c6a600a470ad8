use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{AuditError, AuditLedger, AuditRecord};

/// Append-only JSON-lines audit file (one record per line).
#[derive(Debug)]
pub struct JsonLinesAuditLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesAuditLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditLedger for JsonLinesAuditLedger {
    fn append(&self, records: &[AuditRecord]) -> Result<(), AuditError> {
        if records.is_empty() {
            return Ok(());
        }

        // Serialize everything up front so a bad record writes nothing.
        let mut buf = String::new();
        for record in records {
            buf.push_str(&serde_json::to_string(record)?);
            buf.push('\n');
        }

        let io_err = |source| AuditError::Io {
            path: self.path.clone(),
            source,
        };

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AuditError::Unavailable("lock poisoned".to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        file.write_all(buf.as_bytes()).map_err(io_err)?;
        Ok(())
    }
}
