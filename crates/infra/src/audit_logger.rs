use async_trait::async_trait;
use parking_lot::Mutex;
use resolver_guard_core::{AuditEvent, AuditSink};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AuditLoggerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only JSON-lines log of authorization decisions.
pub struct AuditLogger {
    log_path: PathBuf,
    file: Mutex<File>,
}

impl AuditLogger {
    pub fn new<P: AsRef<Path>>(log_path: P) -> Result<Self, AuditLoggerError> {
        let log_path = log_path.as_ref().to_path_buf();

        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        Ok(Self {
            log_path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn log(&self, event: &AuditEvent) -> Result<(), AuditLoggerError> {
        let json = serde_json::to_string(event)?;
        let mut file = self.file.lock();
        writeln!(file, "{}", json)?;
        file.sync_all()?;
        Ok(())
    }
}

#[async_trait]
impl AuditSink for AuditLogger {
    async fn record(&self, event: &AuditEvent) {
        if let Err(e) = self.log(event) {
            error!("Failed to write audit event to {}: {}", self.log_path.display(), e);
        }
    }
}
