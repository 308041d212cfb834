//! Per-order serialization point
//!
//! Handlers run as independent request tasks; two of them recomputing the
//! same order's aggregates concurrently would both read the pre-update
//! history and race their writebacks. Every read-recompute-write sequence
//! therefore takes this advisory lock for its order id first.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-order advisory locks
#[derive(Default)]
pub struct OrderLocks {
    inner: DashMap<i64, Arc<Mutex<()>>>,
}

impl OrderLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one order, waiting if another handler holds it.
    /// The guard is owned so it can live across await points.
    pub async fn acquire(&self, order_id: i64) -> OwnedMutexGuard<()> {
        let lock = self
            .inner
            .entry(order_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_lock_serializes_same_order() {
        let locks = Arc::new(OrderLocks::new());
        let running = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = locks.clone();
            let running = running.clone();
            let max_seen = max_seen.clone();
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(42).await;
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                running.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_different_orders_do_not_block() {
        let locks = Arc::new(OrderLocks::new());
        let g1 = locks.acquire(1).await;
        // acquiring a different order's lock must not deadlock
        let g2 = locks.acquire(2).await;
        drop(g1);
        drop(g2);
    }
}
