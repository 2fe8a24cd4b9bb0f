//! # plejd-mesh
//!
//! A Rust decoder for frames received from the Plejd BLE mesh.
//!
//! Plejd lights, covers, thermostats, buttons and sensors broadcast short
//! frames over the mesh. This library classifies each frame by its header
//! bytes and, where the mesh reuses one layout for unrelated readings, by
//! the type of the originating device. It then extracts the typed fields.
//!
//! ## Features
//!
//! - Total decoder: any byte sequence yields a [`StateUpdate`], never an error
//! - Device-type disambiguation with a graceful dimming fallback
//! - Pluggable diagnostic sink, `tracing` by default
//! - Optional async event fan-out via Tokio
//!
//! ## Quick Start
//!
//! ```
//! use plejd_mesh::{DeviceRegistry, DeviceType, MeshDecoder, State};
//!
//! let registry = DeviceRegistry::new();
//! registry.register(10, DeviceType::Cover);
//!
//! let decoder = MeshDecoder::new(registry);
//! let update = decoder.decode(&[0x0A, 0x01, 0x10, 0x00, 0xC8, 0x01, 0x2C, 0x00, 0x21]);
//!
//! assert_eq!(update.state, Some(State::Raw(1)));
//! assert_eq!(update.cover_position, Some(44));
//! assert_eq!(update.cover_angle, Some(-30));
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`protocol`] - Frame classification and per-family field decoders
//! - [`types`] - Device types and decoded updates
//! - [`decoder`] - [`MeshDecoder`] entry point tying the pipeline together
//! - [`diagnostic`] - Diagnostic sinks for decoded and unknown frames
//! - [`registry`] - Shared device-type registry
//! - [`event`] - Async event system for decoded updates
//! - [`listener`] - Background task decoding a frame channel

pub mod config;
pub mod decoder;
pub mod diagnostic;
pub mod error;
pub mod event;
pub mod listener;
pub mod protocol;
pub mod registry;
pub mod types;

// Re-exports for convenience
pub use config::DecoderConfig;
pub use decoder::{MeshDecoder, parse_data};
pub use diagnostic::{DiagnosticSink, NullSink, Tag, TracingSink};
pub use error::{Error, Result};
pub use event::{Event, EventDispatcher, EventFilter, Subscription};
pub use listener::MeshListener;
pub use protocol::{FrameKind, classify, parse_hex_frame};
pub use registry::DeviceRegistry;
pub use types::{
    ButtonAction, DeviceAddress, DeviceType, DeviceTypeLookup, State, StateUpdate,
};
