//! Frame helpers.
//!
//! Mesh frames carry no length prefix or header; the transport delivers
//! each notification as one frame. These helpers convert frames to and
//! from the hex form used in logs and captures.

use bytes::Bytes;

use crate::error::Result;

/// Parses a hex-encoded frame.
///
/// Accepts contiguous hex (`0a0110`) as well as bytes separated by
/// whitespace, `:` or `-` (`0A 01 10`, `0a:01:10`).
pub fn parse_hex_frame(s: &str) -> Result<Bytes> {
    let digits: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();
    Ok(Bytes::from(hex::decode(digits)?))
}

/// Formats a frame as lowercase contiguous hex.
#[must_use]
pub fn hex_dump(frame: &[u8]) -> String {
    hex::encode(frame)
}
