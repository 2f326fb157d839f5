//! # Emberkv - A Minimal In-Memory Key-Value Server
//!
//! Emberkv is a small RESP-speaking key-value server: concurrent client
//! connections, a `SET`/`GET` command set with millisecond expiry, and
//! background reclamation of expired keys. All state is volatile.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Emberkv                             │
//! │                                                              │
//! │  ┌────────────┐   ┌────────────┐   ┌────────────┐            │
//! │  │  Listener  │──>│ Connection │──>│ Dispatcher │            │
//! │  │ (main.rs)  │   │  Handler   │   │            │            │
//! │  └────────────┘   └────────────┘   └─────┬──────┘            │
//! │                                          │                   │
//! │  ┌────────────┐                          ▼                   │
//! │  │   Frame    │               ┌─────────────────────┐        │
//! │  │  Decoder   │               │        Store        │        │
//! │  │ / Replies  │               │  Mutex<HashMap<..>> │        │
//! │  └────────────┘               └─────────────────────┘        │
//! │                                          ▲                   │
//! │                            ┌─────────────┴────────────┐      │
//! │                            │         Sweeper          │      │
//! │                            │  (background tokio task) │      │
//! │                            └──────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Supported Commands
//!
//! - `PING`
//! - `ECHO message`
//! - `SET key value [PX milliseconds]`
//! - `GET key`
//! - `INFO replication`
//!
//! ## Design Notes
//!
//! ### One lock, whole critical sections
//!
//! The store is a single map behind a single mutex. A `GET` performs its
//! presence check, expiry check, and eviction inside one lock acquisition,
//! and a `SET` replaces value and expiry as one unit, so concurrent
//! readers and writers always observe whole entries.
//!
//! ### Lazy + active expiry
//!
//! Expired keys are evicted on read (which is what makes expiry visible
//! correctly) and by a fixed-period background sweep (which is what keeps
//! never-read keys from occupying memory forever).
//!
//! ### Two error domains
//!
//! Command errors become `-ERR ...` replies and the connection lives on.
//! Framing errors close the connection: a RESP stream has no way back
//! into sync after malformed bytes.
//!
//! ## Quick Start
//!
//! ```ignore
//! use emberkv::commands::{Dispatcher, Role};
//! use emberkv::connection::{handle_connection, ConnectionStats};
//! use emberkv::store::{start_sweeper, Store};
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(Store::new());
//!     let _sweeper = start_sweeper(Arc::clone(&store));
//!     let stats = Arc::new(ConnectionStats::new());
//!
//!     let listener = TcpListener::bind("127.0.0.1:6379").await.unwrap();
//!     loop {
//!         let (stream, addr) = listener.accept().await.unwrap();
//!         let dispatcher = Dispatcher::new(Arc::clone(&store), Role::Master);
//!         tokio::spawn(handle_connection(stream, addr, dispatcher, Arc::clone(&stats)));
//!     }
//! }
//! ```

pub mod commands;
pub mod connection;
pub mod protocol;
pub mod store;

// Re-export commonly used types for convenience
pub use commands::{Dispatcher, Role};
pub use connection::{handle_connection, ConnectionStats};
pub use protocol::{parse_frame, Frame, FrameError, Reply};
pub use store::{start_sweeper, Store, SweepConfig, Sweeper};

/// The default port emberkv listens on (same as Redis)
pub const DEFAULT_PORT: u16 = 6379;

/// The default host emberkv binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Version of emberkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
