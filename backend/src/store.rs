//! File-backed key-value store for user-uploaded records
//!
//! Plays the role the browser's localStorage plays for the dashboard: each
//! key is an independent JSON array document, read on every pipeline run and
//! appended to by the upload surface. Mutations publish a [`StoreEvent`] on a
//! process-wide broadcast channel so the pipeline can re-run; publishing
//! covers same-process writers as well, not only observers of the file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{broadcast, Mutex};

use crate::error::{AppError, AppResult};

/// Store key for uploaded purchase rows
pub const PURCHASE_KEY: &str = "pharma_purchase_data";

/// Store key for uploaded sale rows
pub const SALES_KEY: &str = "pharma_sales_data";

/// Keys with this prefix trigger a pipeline re-run on mutation
pub const WATCHED_PREFIX: &str = "pharma_";

/// A store mutation notification carrying the changed key.
#[derive(Debug, Clone)]
pub struct StoreEvent {
    pub key: String,
}

/// File-backed key-value store with change notifications.
#[derive(Clone)]
pub struct LocalStore {
    dir: PathBuf,
    events: broadcast::Sender<StoreEvent>,
    /// Serializes read-merge-write cycles across clones; without it,
    /// concurrent appends interleave and drop each other's rows.
    write_lock: Arc<Mutex<()>>,
}

impl LocalStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .map_err(|e| AppError::StorageError(format!("create {}: {}", dir.display(), e)))?;
        let (events, _) = broadcast::channel(64);
        Ok(Self {
            dir,
            events,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Subscribe to mutation events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Read the rows stored under `key`, defaulting to an empty collection
    /// when the document is absent or not valid JSON.
    pub async fn read_rows<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let path = self.document_path(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_slice(&bytes) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding malformed store document");
                Vec::new()
            }
        }
    }

    /// Append rows to the document under `key` and publish a change event.
    ///
    /// The read-merge-write cycle runs under the store's write lock, and the
    /// new document lands via a temp file renamed over the target, so readers
    /// always see either the old or the new complete array.
    pub async fn append_rows<T>(&self, key: &str, rows: &[T]) -> AppResult<usize>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let _guard = self.write_lock.lock().await;

        let mut existing: Vec<T> = self.read_rows(key).await;
        existing.extend(rows.iter().cloned());

        let path = self.document_path(key);
        let body = serde_json::to_vec(&existing)
            .map_err(|e| AppError::StorageError(format!("serialize {}: {}", key, e)))?;

        // Temp name is stable per key; the write lock keeps it exclusive
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| AppError::StorageError(format!("write {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| AppError::StorageError(format!("rename {}: {}", path.display(), e)))?;

        self.notify(key);
        Ok(existing.len())
    }

    /// Publish a change event for `key`. Send errors only mean there is no
    /// subscriber yet, which is fine.
    pub fn notify(&self, key: &str) {
        let _ = self.events.send(StoreEvent {
            key: key.to_string(),
        });
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}
