//! Request Frame Decoder
//!
//! Clients send commands as RESP arrays of bulk strings:
//!
//! ```text
//! *2\r\n$4\r\nECHO\r\n$3\r\nhey\r\n
//! ```
//!
//! The decoder is incremental because TCP is a stream: a read may deliver a
//! partial frame, or several frames at once. [`parse_frame`] returns:
//!
//! - `Ok(Some((frame, consumed)))` - a complete frame, `consumed` bytes used
//! - `Ok(None)` - the buffer holds only a prefix of a frame, read more
//! - `Err(FrameError)` - malformed input, fatal to the connection
//!
//! The caller appends incoming bytes to a buffer, attempts a parse, and on
//! success advances the buffer by `consumed`. A partial frame is never
//! surfaced: either the whole frame decodes or nothing does.
//!
//! Bulk string payloads are consumed by exact byte count, never by line
//! scanning, so an argument may contain arbitrary bytes including `\r\n`.

use crate::protocol::types::{prefix, CRLF};
use bytes::Bytes;
use thiserror::Error;

/// One fully decoded client request: an ordered sequence of binary-safe
/// argument strings. The first element names the command.
pub type Frame = Vec<Bytes>;

/// Errors that make a request stream undecodable.
///
/// Any of these is fatal to the connection that produced it; there is no
/// way to resynchronize a RESP stream after a framing violation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// A header line started with something other than `*` or `$`
    #[error("unexpected prefix byte: {0:#04x}")]
    UnexpectedPrefix(u8),

    /// A length token was not a valid non-negative decimal integer
    #[error("invalid length token: {0:?}")]
    InvalidLength(String),

    /// Structural violation (missing CRLF trailer, etc.)
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A bulk string exceeds the maximum allowed size
    #[error("bulk string too large: {size} bytes (max: {max})")]
    TooLarge { size: usize, max: usize },

    /// A frame declares more elements than the server accepts
    #[error("too many frame elements: {count} (max: {max})")]
    TooManyArgs { count: usize, max: usize },
}

/// Result type for frame decoding.
pub type FrameResult<T> = Result<T, FrameError>;

/// Maximum size for a single bulk string (512 MB, same as Redis)
pub const MAX_BULK_SIZE: usize = 512 * 1024 * 1024;

/// Maximum number of elements in one request frame
pub const MAX_FRAME_ARGS: usize = 1024 * 1024;

/// Attempts to decode one request frame from the buffer.
///
/// See the module docs for the incremental contract.
pub fn parse_frame(buf: &[u8]) -> FrameResult<Option<(Frame, usize)>> {
    if buf.is_empty() {
        return Ok(None);
    }

    if buf[0] != prefix::ARRAY {
        return Err(FrameError::UnexpectedPrefix(buf[0]));
    }

    let count_end = match find_crlf(&buf[1..]) {
        Some(pos) => pos,
        None => return Ok(None),
    };

    let count = parse_decimal(&buf[1..1 + count_end])?;
    if count > MAX_FRAME_ARGS {
        return Err(FrameError::TooManyArgs {
            count,
            max: MAX_FRAME_ARGS,
        });
    }

    // *<count>\r\n
    let mut consumed = 1 + count_end + 2;
    let mut args = Vec::with_capacity(count);

    for _ in 0..count {
        match parse_bulk(&buf[consumed..])? {
            Some((arg, used)) => {
                args.push(arg);
                consumed += used;
            }
            None => return Ok(None),
        }
    }

    Ok(Some((args, consumed)))
}

/// Decodes one bulk string element: `$<len>\r\n<data>\r\n`.
fn parse_bulk(buf: &[u8]) -> FrameResult<Option<(Bytes, usize)>> {
    if buf.is_empty() {
        return Ok(None);
    }

    if buf[0] != prefix::BULK_STRING {
        return Err(FrameError::UnexpectedPrefix(buf[0]));
    }

    let len_end = match find_crlf(&buf[1..]) {
        Some(pos) => pos,
        None => return Ok(None),
    };

    let len = parse_decimal(&buf[1..1 + len_end])?;
    if len > MAX_BULK_SIZE {
        return Err(FrameError::TooLarge {
            size: len,
            max: MAX_BULK_SIZE,
        });
    }

    // $<len>\r\n
    let data_start = 1 + len_end + 2;
    let total = data_start + len + 2;
    if buf.len() < total {
        return Ok(None);
    }

    if &buf[data_start + len..total] != CRLF {
        return Err(FrameError::Protocol(
            "bulk string missing trailing CRLF".to_string(),
        ));
    }

    let data = Bytes::copy_from_slice(&buf[data_start..data_start + len]);
    Ok(Some((data, total)))
}

/// Parses a non-negative decimal wire token.
///
/// This is the single place numeric wire tokens are parsed: frame element
/// counts, bulk string lengths, and the dispatcher's PX millisecond values
/// all come through here. A sign, non-digit byte, empty token, or overflow
/// is one failure kind.
pub fn parse_decimal(token: &[u8]) -> FrameResult<usize> {
    if token.is_empty() {
        return Err(FrameError::InvalidLength(String::new()));
    }

    let mut n: usize = 0;
    for &b in token {
        if !b.is_ascii_digit() {
            return Err(FrameError::InvalidLength(
                String::from_utf8_lossy(token).into_owned(),
            ));
        }
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add((b - b'0') as usize))
            .ok_or_else(|| {
                FrameError::InvalidLength(String::from_utf8_lossy(token).into_owned())
            })?;
    }

    Ok(n)
}

/// Finds the position of CRLF in the buffer.
///
/// Returns the position of `\r` if found, or None if CRLF is not present.
#[inline]
fn find_crlf(buf: &[u8]) -> Option<usize> {
    for i in 0..buf.len().saturating_sub(1) {
        if buf[i] == b'\r' && buf[i + 1] == b'\n' {
            return Some(i);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ping() {
        let input = b"*1\r\n$4\r\nPING\r\n";
        let (frame, consumed) = parse_frame(input).unwrap().unwrap();
        assert_eq!(frame, vec![Bytes::from("PING")]);
        assert_eq!(consumed, input.len());
    }

    #[test]
    fn test_parse_set_command() {
        let input = b"*3\r\n$3\r\nSET\r\n$3\r\nfoo\r\n$3\r\nbar\r\n";
        let (frame, consumed) = parse_frame(input).unwrap().unwrap();
        assert_eq!(
            frame,
            vec![Bytes::from("SET"), Bytes::from("foo"), Bytes::from("bar")]
        );
        assert_eq!(consumed, input.len());
    }

    #[test]
    fn test_parse_empty_frame() {
        // Zero-element frame decodes cleanly; the dispatcher skips it
        let (frame, consumed) = parse_frame(b"*0\r\n").unwrap().unwrap();
        assert!(frame.is_empty());
        assert_eq!(consumed, 4);
    }

    #[test]
    fn test_parse_empty_argument() {
        let (frame, _) = parse_frame(b"*1\r\n$0\r\n\r\n").unwrap().unwrap();
        assert_eq!(frame, vec![Bytes::new()]);
    }

    #[test]
    fn test_binary_safe_argument() {
        // The payload contains CRLF and a NUL; only the length prefix counts
        let input = b"*1\r\n$6\r\na\r\nb\x00c\r\n";
        let (frame, consumed) = parse_frame(input).unwrap().unwrap();
        assert_eq!(frame, vec![Bytes::from(&b"a\r\nb\x00c"[..])]);
        assert_eq!(consumed, input.len());
    }

    #[test]
    fn test_incomplete_header() {
        assert!(parse_frame(b"*2").unwrap().is_none());
        assert!(parse_frame(b"*2\r\n").unwrap().is_none());
        assert!(parse_frame(b"*2\r\n$4").unwrap().is_none());
    }

    #[test]
    fn test_incomplete_payload_yields_nothing() {
        // A $5 header followed by fewer than 5 payload bytes must not
        // produce a partial frame
        assert!(parse_frame(b"*1\r\n$5\r\nhel").unwrap().is_none());
        assert!(parse_frame(b"*2\r\n$4\r\nECHO\r\n$3\r\nhe").unwrap().is_none());
    }

    #[test]
    fn test_leftover_bytes_not_consumed() {
        let input = b"*1\r\n$4\r\nPING\r\n*1\r\n$4\r\nPING\r\n";
        let (_, consumed) = parse_frame(input).unwrap().unwrap();
        assert_eq!(consumed, 14);
    }

    #[test]
    fn test_bad_frame_prefix() {
        assert_eq!(
            parse_frame(b"+OK\r\n"),
            Err(FrameError::UnexpectedPrefix(b'+'))
        );
    }

    #[test]
    fn test_bad_element_prefix() {
        assert_eq!(
            parse_frame(b"*1\r\n:42\r\n"),
            Err(FrameError::UnexpectedPrefix(b':'))
        );
    }

    #[test]
    fn test_invalid_count_token() {
        assert!(matches!(
            parse_frame(b"*abc\r\n"),
            Err(FrameError::InvalidLength(_))
        ));
        // Negative counts are not valid request framing
        assert!(matches!(
            parse_frame(b"*-1\r\n"),
            Err(FrameError::InvalidLength(_))
        ));
    }

    #[test]
    fn test_invalid_length_token() {
        assert!(matches!(
            parse_frame(b"*1\r\n$x\r\nhi\r\n"),
            Err(FrameError::InvalidLength(_))
        ));
        assert!(matches!(
            parse_frame(b"*1\r\n$-1\r\n"),
            Err(FrameError::InvalidLength(_))
        ));
    }

    #[test]
    fn test_missing_payload_trailer() {
        assert!(matches!(
            parse_frame(b"*1\r\n$4\r\nPINGXX"),
            Err(FrameError::Protocol(_))
        ));
    }

    #[test]
    fn test_oversized_declarations() {
        let huge = format!("*1\r\n${}\r\n", MAX_BULK_SIZE + 1);
        assert!(matches!(
            parse_frame(huge.as_bytes()),
            Err(FrameError::TooLarge { .. })
        ));

        let many = format!("*{}\r\n", MAX_FRAME_ARGS + 1);
        assert!(matches!(
            parse_frame(many.as_bytes()),
            Err(FrameError::TooManyArgs { .. })
        ));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(b"0"), Ok(0));
        assert_eq!(parse_decimal(b"6379"), Ok(6379));
        assert!(parse_decimal(b"").is_err());
        assert!(parse_decimal(b"-1").is_err());
        assert!(parse_decimal(b"+1").is_err());
        assert!(parse_decimal(b"12a").is_err());
        assert!(parse_decimal(b"99999999999999999999999999").is_err());
    }
}
