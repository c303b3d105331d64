//! Proxy Status Line Handling
//!
//! Only the first line of the proxy's reply is read. Proxies are not required
//! to send a well-formed HTTP response after it, so nothing else is consumed.

use std::io::{BufRead, BufReader, Read};

/// Longest status line accepted; anything beyond it is treated as a partial line
pub const MAX_STATUS_LINE_BYTES: u64 = 8192;

/// Marker searched for, case-insensitively, in the proxy's status line
pub const TUNNEL_ESTABLISHED_MARKER: &str = "200 connection established";

/// First line read from the proxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    /// A `\n`-terminated line (terminator included)
    Complete(String),
    /// Whatever arrived before EOF or a read error, without a terminator
    Partial(String),
}

impl StatusLine {
    /// Line text with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        match self {
            StatusLine::Complete(line) | StatusLine::Partial(line) => line.trim(),
        }
    }
}

/// Read a single `\n`-terminated line from the proxy
///
/// Read errors are not reported separately: they end the line the same way
/// EOF does, yielding whatever was received as a `Partial` line. At most
/// [`MAX_STATUS_LINE_BYTES`] are consumed.
pub fn read_status_line<R: Read>(reader: R) -> StatusLine {
    let mut reader = BufReader::new(reader.take(MAX_STATUS_LINE_BYTES));
    let mut buf = Vec::new();
    let result = reader.read_until(b'\n', &mut buf);
    let text = String::from_utf8_lossy(&buf).into_owned();

    match result {
        Ok(_) if buf.last() == Some(&b'\n') => StatusLine::Complete(text),
        _ => StatusLine::Partial(text),
    }
}

/// Whether a status line reports an established tunnel
///
/// Matches `200 connection established` anywhere in the line, ignoring case,
/// so `HTTP/1.1 200 Connection established` and
/// `HTTP/1.0 200 CONNECTION ESTABLISHED\r\n` are both accepted.
pub fn is_tunnel_established(line: &str) -> bool {
    line.to_lowercase().contains(TUNNEL_ESTABLISHED_MARKER)
}
