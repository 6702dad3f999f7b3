//! Lead Persistence
//!
//! Submitted leads end up in a flat JSON array on disk. The `LeadStore` trait
//! lets the SDR service stay agnostic of where leads go, which also keeps the
//! submit tool testable without touching the filesystem.

use crate::json_file;
use crate::lead::LeadRecord;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to access lead database {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize lead record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Defines the contract for any backend that can keep submitted leads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Appends one record and returns the number of records now stored.
    async fn append(&self, record: LeadRecord) -> Result<usize, StoreError>;

    /// Returns every stored record, oldest first.
    async fn load_all(&self) -> Result<Vec<Value>, StoreError>;
}

/// A `LeadStore` backed by a single JSON file that is rewritten on every append.
///
/// Existing records are kept as raw JSON so that fields this version does
/// not know about survive the rewrite untouched. Appends through the same
/// instance are serialized; separate processes writing the same file are not
/// coordinated.
pub struct JsonFileLeadStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileLeadStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl LeadStore for JsonFileLeadStore {
    async fn append(&self, record: LeadRecord) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records: Vec<Value> = json_file::read_or_default(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        records.push(serde_json::to_value(&record)?);

        json_file::write_pretty(&self.path, &records)
            .await
            .map_err(|e| self.io_error(e))?;

        info!(path = %self.path.display(), total = records.len(), "Lead saved");
        Ok(records.len())
    }

    async fn load_all(&self) -> Result<Vec<Value>, StoreError> {
        json_file::read_or_default(&self.path)
            .await
            .map_err(|e| self.io_error(e))
    }
}

/// A `LeadStore` that keeps records in memory, for demos and tests.
#[derive(Default)]
pub struct InMemoryLeadStore {
    records: Mutex<Vec<Value>>,
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn append(&self, record: LeadRecord) -> Result<usize, StoreError> {
        let mut records = self.records.lock().await;
        records.push(serde_json::to_value(&record)?);
        Ok(records.len())
    }

    async fn load_all(&self) -> Result<Vec<Value>, StoreError> {
        Ok(self.records.lock().await.clone())
    }
}
