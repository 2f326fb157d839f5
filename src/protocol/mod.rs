//! RESP Wire Codec
//!
//! A pure transform layer with no state of its own:
//!
//! - `parser`: incremental decoder turning raw socket bytes into request
//!   frames (arrays of binary-safe argument strings)
//! - `types`: the reply variants the server produces and their
//!   serialization back to wire bytes
//!
//! ## Example
//!
//! ```
//! use emberkv::protocol::{parse_frame, Reply};
//! use bytes::Bytes;
//!
//! let data = b"*2\r\n$4\r\nECHO\r\n$3\r\nhey\r\n";
//! let (frame, consumed) = parse_frame(data).unwrap().unwrap();
//! assert_eq!(consumed, data.len());
//!
//! let reply = Reply::bulk(frame[1].clone());
//! assert_eq!(reply.serialize(), b"$3\r\nhey\r\n");
//! ```

pub mod parser;
pub mod types;

pub use parser::{parse_decimal, parse_frame, Frame, FrameError, FrameResult};
pub use types::Reply;
