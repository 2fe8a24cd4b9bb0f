//! Diagnostic sink for decoded and undecoded frames.
//!
//! The decoder reports what it saw for every frame, including frames it
//! cannot interpret. The sink is purely observational: swapping it out
//! never changes decoding results.

use std::fmt;

use crate::types::DeviceAddress;

/// Tracing target used by [`TracingSink`].
pub const FRAME_TARGET: &str = "plejd_mesh::frame";

/// Category code for time sync frames.
pub const TAG_TIME: &str = "TME";

/// Category code for scene frames.
pub const TAG_SCENE: &str = "SCN";

/// Tag attached to a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Frame originated from a known address.
    Address(DeviceAddress),
    /// Short category code for frames without a device address.
    Category(&'static str),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(addr) => write!(f, "0x{addr:02x}"),
            Self::Category(code) => f.write_str(code),
        }
    }
}

/// Receiver of human-readable frame diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Records one message, optionally tagged.
    fn record(&self, tag: Option<Tag>, message: &str);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn record(&self, tag: Option<Tag>, message: &str) {
        (**self).record(tag, message);
    }
}

/// Sink that emits `tracing` debug events under [`FRAME_TARGET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, tag: Option<Tag>, message: &str) {
        if let Some(tag) = tag {
            tracing::debug!(target: FRAME_TARGET, %tag, "{message}");
        } else {
            tracing::debug!(target: FRAME_TARGET, "{message}");
        }
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _tag: Option<Tag>, _message: &str) {}
}
