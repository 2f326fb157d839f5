//! Mutex-Guarded Key-Value Store with TTL Support
//!
//! The store is one `HashMap` behind one `Mutex`. Every operation that has
//! to observe or change an entry's lifetime runs inside a single lock
//! acquisition, which is what makes expiry correct under concurrency: a
//! reader can never see an entry between "found expired" and "evicted",
//! and a `set` replaces key, value, and expiry as one unit.
//!
//! ## Expiry Model
//!
//! An entry whose deadline has passed is logically absent the moment the
//! clock crosses it, whether or not it is still physically in the map:
//!
//! 1. **Lazy**: `get` checks the deadline under the lock, evicts, and
//!    reports a miss. This alone guarantees no expired value is ever
//!    returned.
//! 2. **Active**: the background sweeper (see [`expiry`](super::expiry))
//!    calls [`Store::purge_expired`] periodically so that keys which are
//!    never read again do not occupy memory forever.
//!
//! The store is a plain service object. It is constructed explicitly and
//! handed to the dispatcher and the sweeper behind an `Arc`, so tests can
//! build an isolated instance without any process-global state.

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A stored value with an optional absolute expiry instant.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The opaque payload
    pub value: Bytes,
    /// Absolute deadline; `None` means the entry never expires
    pub expires_at: Option<Instant>,
}

impl Entry {
    /// Creates an entry, with expiry `now + ttl` when a ttl is given.
    pub fn new(value: Bytes, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    /// Whether the deadline has passed relative to `now`.
    #[inline]
    fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.map(|exp| now >= exp).unwrap_or(false)
    }
}

/// The shared key-value store.
///
/// Wrap it in an `Arc` and clone the handle into every connection task and
/// the sweeper. All accesses serialize on one mutex; the workload this
/// server targets is low-contention, so simplicity wins over
/// read-parallelism.
///
/// # Example
///
/// ```
/// use emberkv::store::Store;
/// use bytes::Bytes;
/// use std::time::Duration;
///
/// let store = Store::new();
/// store.set(Bytes::from("name"), Bytes::from("ember"), None);
/// assert_eq!(store.get(&Bytes::from("name")), Some(Bytes::from("ember")));
///
/// store.set(Bytes::from("session"), Bytes::from("tok"), Some(Duration::from_millis(50)));
/// ```
#[derive(Debug, Default)]
pub struct Store {
    entries: Mutex<HashMap<Bytes, Entry>>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Sets a key, replacing any prior entry wholesale.
    ///
    /// With `ttl` the entry expires `ttl` from now; without it the entry
    /// lives until overwritten or deleted. Always succeeds.
    pub fn set(&self, key: Bytes, value: Bytes, ttl: Option<Duration>) {
        let entry = Entry::new(value, ttl);
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key, entry);
    }

    /// Gets the value for a key.
    ///
    /// Returns `None` if the key is absent or expired. An expired entry is
    /// evicted here, under the same lock acquisition as the presence check,
    /// so no reader can observe it half-gone.
    pub fn get(&self, key: &Bytes) -> Option<Bytes> {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap();

        match entries.get(key) {
            Some(entry) if entry.is_expired_at(now) => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    /// Removes a key.
    ///
    /// Returns `true` if an entry was removed, `false` if none existed.
    pub fn delete(&self, key: &Bytes) -> bool {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key).is_some()
    }

    /// Number of physically present entries.
    ///
    /// Counts entries the sweeper has not reclaimed yet, so an expired but
    /// unswept key is included. Observability only.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Returns true if no entries are physically present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evicts every entry whose deadline has passed.
    ///
    /// One lock acquisition covers the whole scan, so the sweep serializes
    /// with concurrent `get`/`set` calls the same way they serialize with
    /// each other. Returns the number of entries evicted.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap();

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }
}
