//! Persistence backends for the ledger.
//!
//! The contract is whole-collection replace: `save` rewrites the full record
//! list as one JSON array under a single key, `load` reads it back. There is
//! no partial update and no append log, so a crash between a failed save and
//! the next successful one loses the most recent appends.

use std::{
    future::Future,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::{error::StoreError, record::Record};

/// Key the serialized array lives under; the file-backed store materializes
/// it as `<data_dir>/expenses.json`.
pub const LEDGER_KEY: &str = "expenses";

/// A durable key-value backend holding the serialized record collection.
pub trait Store {
    /// Read the previously saved collection. `None` means no prior data.
    fn load(&self) -> impl Future<Output = Result<Option<Vec<Record>>, StoreError>> + Send;

    /// Durably replace any prior content with `records`, preserving order.
    fn save(&self, records: &[Record]) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// File-backed store: one pretty-printed JSON array kept in a single file
/// inside the data directory.
#[derive(Clone, Debug)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join(format!("{LEDGER_KEY}.json")),
        }
    }

    /// Path of the backing blob, mostly useful in logs.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for JsonStore {
    async fn load(&self) -> Result<Option<Vec<Record>>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let records = serde_json::from_str(&content)?;
        Ok(Some(records))
    }

    async fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let payload = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, payload).await?;
        tracing::debug!("saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// Ephemeral store keeping the blob in memory. Nothing survives the process;
/// backs the `memory` storage mode and the test suite.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Option<Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    async fn load(&self) -> Result<Option<Vec<Record>>, StoreError> {
        let records = self.records.lock().unwrap_or_else(|err| err.into_inner());
        Ok(records.clone())
    }

    async fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        let mut slot = self.records.lock().unwrap_or_else(|err| err.into_inner());
        *slot = Some(records.to_vec());
        Ok(())
    }
}
