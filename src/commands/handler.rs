//! Command Dispatcher
//!
//! Maps a decoded request frame to a handler, validates arity, and
//! produces the reply. The command surface is deliberately small:
//!
//! - `PING` - liveness check
//! - `ECHO message` - returns the message
//! - `SET key value [PX milliseconds]` - store, optionally with expiry
//! - `GET key` - fetch, `$-1` on miss or expiry
//! - `INFO replication` - reports the server role
//!
//! Command names match case-insensitively. Command-level failures (bad
//! arity, bad PX value, unknown command) are error replies, never
//! connection-fatal: the client keeps its connection and sends the next
//! command.

use crate::protocol::{parse_decimal, Reply};
use crate::store::Store;
use bytes::Bytes;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// The process-wide replication role.
///
/// Fixed at startup from configuration and read-only afterwards. The only
/// observer is `INFO replication`; no leader/follower protocol hangs off
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Master,
    Replica,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Master => "master",
            Role::Replica => "replica",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Executes commands against the shared store.
///
/// Cheap to clone; every connection task carries one.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: Arc<Store>,
    role: Role,
}

impl Dispatcher {
    /// Creates a dispatcher over the given store with the given role.
    pub fn new(store: Arc<Store>, role: Role) -> Self {
        Self { store, role }
    }

    /// Dispatches one request frame.
    ///
    /// Returns `None` for an empty frame: zero-element frames are valid
    /// framing, produce no reply, and the connection just reads on.
    pub fn dispatch(&self, frame: &[Bytes]) -> Option<Reply> {
        let name = frame.first()?;
        let name = String::from_utf8_lossy(name).to_uppercase();
        let args = &frame[1..];

        let reply = match name.as_str() {
            "PING" => self.cmd_ping(args),
            "ECHO" => self.cmd_echo(args),
            "SET" => self.cmd_set(args),
            "GET" => self.cmd_get(args),
            "INFO" => self.cmd_info(args),
            _ => Reply::error(format!("ERR unknown command '{}'", name)),
        };

        Some(reply)
    }

    /// PING
    fn cmd_ping(&self, args: &[Bytes]) -> Reply {
        if !args.is_empty() {
            return wrong_args("ping");
        }
        Reply::pong()
    }

    /// ECHO message
    fn cmd_echo(&self, args: &[Bytes]) -> Reply {
        match args {
            [message] => Reply::Bulk(message.clone()),
            _ => wrong_args("echo"),
        }
    }

    /// SET key value [PX milliseconds]
    ///
    /// Exactly two shapes are accepted: the bare three-argument form, and
    /// the five-argument form whose fourth argument is `PX`. Everything
    /// else (including the dangling four-argument `SET k v PX`) is an
    /// arity error.
    fn cmd_set(&self, args: &[Bytes]) -> Reply {
        match args {
            [key, value] => {
                self.store.set(key.clone(), value.clone(), None);
                Reply::ok()
            }
            [key, value, opt, millis] if opt.eq_ignore_ascii_case(b"px") => {
                let millis = match parse_decimal(millis) {
                    Ok(n) => n as u64,
                    Err(_) => return Reply::error("ERR invalid expire time in set"),
                };
                self.store
                    .set(key.clone(), value.clone(), Some(Duration::from_millis(millis)));
                Reply::ok()
            }
            _ => wrong_args("set"),
        }
    }

    /// GET key
    fn cmd_get(&self, args: &[Bytes]) -> Reply {
        match args {
            [key] => match self.store.get(key) {
                Some(value) => Reply::Bulk(value),
                None => Reply::NullBulk,
            },
            _ => wrong_args("get"),
        }
    }

    /// INFO replication
    fn cmd_info(&self, args: &[Bytes]) -> Reply {
        match args {
            [section] if section.eq_ignore_ascii_case(b"replication") => {
                Reply::bulk(format!("role:{}\r\n", self.role))
            }
            _ => Reply::error("ERR unknown INFO subcommand"),
        }
    }
}

/// The standard arity error reply.
fn wrong_args(cmd: &str) -> Reply {
    Reply::error(format!(
        "ERR wrong number of arguments for '{}' command",
        cmd
    ))
}
