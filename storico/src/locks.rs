use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Per-series async locks.
///
/// Concurrent operations on the same id (a get-miss racing a refresh, two
/// refreshes) serialize against each other; operations on different ids do
/// not. Lock entries are created on first touch and kept for the lifetime
/// of the orchestrator; the catalog is small, so the table never needs
/// eviction.
#[derive(Debug, Default)]
pub(crate) struct SeriesLocks {
    table: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SeriesLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn acquire(&self, series_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut table = self
                .table
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            Arc::clone(table.entry(series_id.to_owned()).or_default())
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::SeriesLocks;

    #[tokio::test]
    async fn same_id_serializes_different_ids_do_not() {
        let locks = SeriesLocks::new();
        let held = locks.acquire("SP500").await;

        // A different id is immediately available.
        let other = locks.acquire("DGS10").await;
        drop(other);

        // The same id is not until the first guard drops.
        let contended = locks.acquire("SP500");
        tokio::pin!(contended);
        assert!(
            futures::poll!(contended.as_mut()).is_pending(),
            "second acquire on a held id must wait"
        );
        drop(held);
        let _ = contended.await;
    }
}
