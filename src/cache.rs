//! Lazily-populated process-wide cache of the launch artifact document.
//!
//! The slot transitions unloaded -> {loaded | errored} at most once per
//! process; a failed load is cached exactly like a successful one, so the
//! artifact store is not re-read until `invalidate` is called or the process
//! restarts.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArtifactError {
    #[error("Data file not available")]
    NotFound,
    #[error("data file unreadable: {0}")]
    Unreadable(String),
    #[error("data file malformed: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Uninitialized,
    Ready,
    Failed,
}

type Slot = Option<Result<Arc<Value>, ArtifactError>>;

pub struct ArtifactCache {
    path: PathBuf,
    slot: RwLock<Slot>,
    load_attempts: AtomicU64,
}

impl ArtifactCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            slot: RwLock::new(None),
            load_attempts: AtomicU64::new(0),
        }
    }

    /// Returns the cached outcome, reading the artifact store only on the
    /// first call after construction or `invalidate`.
    pub async fn load(&self) -> Result<Arc<Value>, ArtifactError> {
        if let Some(outcome) = self.slot.read().await.clone() {
            return outcome;
        }

        let mut slot = self.slot.write().await;
        // Another task may have populated the slot while this one waited for
        // the write lock.
        if let Some(outcome) = slot.clone() {
            return outcome;
        }

        let outcome = self.read_artifact().await;
        *slot = Some(outcome.clone());
        outcome
    }

    /// Reports the slot state without triggering a load.
    pub async fn status(&self) -> CacheStatus {
        match &*self.slot.read().await {
            None => CacheStatus::Uninitialized,
            Some(Ok(_)) => CacheStatus::Ready,
            Some(Err(_)) => CacheStatus::Failed,
        }
    }

    /// Clears the slot so the next `load` re-reads the artifact store.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }

    /// Number of artifact store reads performed so far.
    pub fn load_attempts(&self) -> u64 {
        self.load_attempts.load(Ordering::Relaxed)
    }

    async fn read_artifact(&self) -> Result<Arc<Value>, ArtifactError> {
        self.load_attempts.fetch_add(1, Ordering::Relaxed);

        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ArtifactError::NotFound)
            }
            Err(err) => return Err(ArtifactError::Unreadable(err.to_string())),
        };

        serde_json::from_slice(&bytes)
            .map(Arc::new)
            .map_err(|err| ArtifactError::Malformed(err.to_string()))
    }
}
