//! Client Connection Management
//!
//! Every accepted client runs in its own async task:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              TCP Listener (main.rs)          │
//! └──────────────────────┬───────────────────────┘
//!                        │ accept()
//!                        ▼
//!              spawn handle_connection
//!                        │
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │             ConnectionHandler                │
//! │  read bytes → decode frame → dispatch →      │
//! │  write reply → loop                          │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! A handler is single-threaded per connection: one command at a time,
//! replies in order. Concurrency comes from running many handlers, all
//! sharing one store behind its lock.

pub mod handler;

pub use handler::{handle_connection, ConnectionError, ConnectionHandler, ConnectionStats};
