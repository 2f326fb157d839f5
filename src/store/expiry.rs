//! Background Expiry Sweeper
//!
//! Lazy expiry in [`Store::get`](super::Store::get) already guarantees
//! that no caller ever sees an expired value. What it cannot do is reclaim
//! memory for keys that are set with a ttl and then never read again; those
//! would sit in the map until process exit. The sweeper is that backstop:
//! a background task that wakes on a fixed period and purges every entry
//! whose deadline has passed.
//!
//! The sweep is not a correctness mechanism. If the sweeper falls behind or
//! is stopped, reads stay correct; only memory reclamation gets staler.
//!
//! Each tick takes the store's lock once for the whole scan, so a tick
//! either runs to completion or has not started; ticks never overlap.

use crate::store::Store;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

/// Configuration for the expiry sweeper.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Fixed interval between sweeps (default: 100ms)
    pub interval: Duration,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
        }
    }
}

/// A handle to the running sweeper task.
///
/// Dropping the handle stops the task.
#[derive(Debug)]
pub struct Sweeper {
    shutdown_tx: watch::Sender<bool>,
}

impl Sweeper {
    /// Starts the sweeper as a background task.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use emberkv::store::{Store, Sweeper, SweepConfig};
    /// use std::sync::Arc;
    ///
    /// let store = Arc::new(Store::new());
    /// let sweeper = Sweeper::start(Arc::clone(&store), SweepConfig::default());
    ///
    /// // ... runs until the handle is dropped
    /// drop(sweeper);
    /// ```
    pub fn start(store: Arc<Store>, config: SweepConfig) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(sweep_loop(store, config, shutdown_rx));

        info!("Background expiry sweeper started");

        Self { shutdown_tx }
    }

    /// Stops the sweeper task.
    ///
    /// Called automatically when the handle is dropped.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
        info!("Background expiry sweeper stopped");
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The sweeper task body: sleep, purge, repeat.
async fn sweep_loop(store: Arc<Store>, config: SweepConfig, mut shutdown_rx: watch::Receiver<bool>) {
    loop {
        tokio::select! {
            _ = tokio::time::sleep(config.interval) => {}
            result = shutdown_rx.changed() => {
                if result.is_err() || *shutdown_rx.borrow() {
                    debug!("Expiry sweeper received shutdown signal");
                    return;
                }
            }
        }

        let expired = store.purge_expired();
        if expired > 0 {
            debug!(
                expired = expired,
                keys_remaining = store.len(),
                "Expired keys reclaimed"
            );
        }
    }
}

/// Starts the sweeper with the default 100ms interval.
pub fn start_sweeper(store: Arc<Store>) -> Sweeper {
    Sweeper::start(store, SweepConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_sweeper_reclaims_expired_keys() {
        let store = Arc::new(Store::new());

        for i in 0..10 {
            store.set(
                Bytes::from(format!("key{}", i)),
                Bytes::from("value"),
                Some(Duration::from_millis(40)),
            );
        }
        store.set(Bytes::from("persistent"), Bytes::from("value"), None);

        assert_eq!(store.len(), 11);

        let config = SweepConfig {
            interval: Duration::from_millis(10),
        };
        let _sweeper = Sweeper::start(Arc::clone(&store), config);

        tokio::time::sleep(Duration::from_millis(200)).await;

        // Reclaimed without any reads touching the keys
        assert_eq!(store.len(), 1);
        assert!(store.get(&Bytes::from("persistent")).is_some());
    }

    #[tokio::test]
    async fn test_sweeper_never_evicts_live_keys() {
        let store = Arc::new(Store::new());

        store.set(
            Bytes::from("long"),
            Bytes::from("value"),
            Some(Duration::from_secs(60)),
        );
        store.set(Bytes::from("forever"), Bytes::from("value"), None);

        let config = SweepConfig {
            interval: Duration::from_millis(10),
        };
        let _sweeper = Sweeper::start(Arc::clone(&store), config);

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_sweeper_stops_on_drop() {
        let store = Arc::new(Store::new());

        {
            let _sweeper = Sweeper::start(
                Arc::clone(&store),
                SweepConfig {
                    interval: Duration::from_millis(10),
                },
            );
            tokio::time::sleep(Duration::from_millis(30)).await;
            // Handle dropped here
        }

        store.set(
            Bytes::from("key"),
            Bytes::from("value"),
            Some(Duration::from_millis(10)),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;

        // No sweeper, so the entry is still physically present
        assert_eq!(store.len(), 1);
        // but a read still reports it gone (lazy expiry owns correctness)
        assert_eq!(store.get(&Bytes::from("key")), None);
    }
}
