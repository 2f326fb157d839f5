//! Command Processing Layer
//!
//! Receives decoded request frames, validates and executes them against
//! the store, and returns the reply to serialize.
//!
//! ```text
//! Client Request
//!       │
//!       ▼
//! ┌─────────────────┐
//! │  Frame Decoder  │  (protocol module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Dispatcher    │  (this module)
//! │                 │
//! │  - Route        │
//! │  - Validate     │
//! │  - Execute      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     Store       │  (store module)
//! └─────────────────┘
//! ```
//!
//! Supported commands: `PING`, `ECHO`, `SET [PX]`, `GET`,
//! `INFO replication`.

pub mod handler;

pub use handler::{Dispatcher, Role};
