//! Per-run-id serialization.
//!
//! The surrounding trigger infrastructure may deliver two preparation
//! requests for the same run concurrently. The run record must only ever
//! have one writer, so preparations for the same id are serialized through
//! this registry; different ids proceed in parallel.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-run-id locks.
#[derive(Debug, Clone, Default)]
pub struct RunLockRegistry {
    locks: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl RunLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a run id, waiting if another preparation of the
    /// same run holds it. The guard releases on drop.
    pub async fn acquire(&self, run_id: i64) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(run_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}
