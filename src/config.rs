//! Decoder and listener configuration.

/// Default capacity of the event broadcast channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Configuration for [`MeshDecoder`](crate::MeshDecoder) and
/// [`MeshListener`](crate::MeshListener).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Emit a second diagnostic record per frame with the full hex dump.
    pub hex_dump: bool,
    /// Capacity of the event broadcast channel.
    pub event_capacity: usize,
}

impl DecoderConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hex_dump: true,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    /// Enables or disables the per-frame hex dump.
    #[must_use]
    pub const fn hex_dump(mut self, enabled: bool) -> Self {
        self.hex_dump = enabled;
        self
    }

    /// Sets the event channel capacity.
    ///
    /// Zero is treated as one when the channel is created.
    #[must_use]
    pub const fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new()
    }
}
