//! Key-Value Store
//!
//! The shared state of the server: a mutex-guarded map with optional
//! per-entry expiry, plus the background task that reclaims expired
//! entries.
//!
//! - `engine`: the [`Store`] service object (`set`/`get`/`delete` with
//!   lazy expiry, `purge_expired` for the sweep)
//! - `expiry`: the fixed-period [`Sweeper`] task
//!
//! ## Example
//!
//! ```
//! use emberkv::store::Store;
//! use bytes::Bytes;
//! use std::time::Duration;
//!
//! let store = Store::new();
//! store.set(Bytes::from("name"), Bytes::from("ember"), None);
//! assert_eq!(store.get(&Bytes::from("name")), Some(Bytes::from("ember")));
//!
//! store.set(
//!     Bytes::from("session"),
//!     Bytes::from("token123"),
//!     Some(Duration::from_secs(3600)),
//! );
//! ```

pub mod engine;
pub mod expiry;

pub use engine::{Entry, Store};
pub use expiry::{start_sweeper, SweepConfig, Sweeper};
