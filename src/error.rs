//! Error types for the plejd-mesh library.
//!
//! Frame decoding itself never fails; these errors only come from the
//! helper surfaces around it (hex input, registry names, event channels).

use thiserror::Error;

/// The main error type for plejd-mesh operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Hex-encoded frame could not be parsed.
    #[error("invalid hex frame: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Device type name not known to the registry.
    #[error("unknown device type: {name}")]
    UnknownDeviceType { name: String },

    /// Event or frame channel closed.
    #[error("channel closed")]
    ChannelClosed,
}

/// Result type alias for plejd-mesh operations.
pub type Result<T> = std::result::Result<T, Error>;
