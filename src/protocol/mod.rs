//! Protocol definitions for the Plejd mesh.
//!
//! This module contains the low-level protocol pieces:
//! - Command bytes
//! - Frame classification
//! - Field decoders per command family
//! - Hex frame helpers

pub mod classifier;
pub mod command;
pub mod frame;
pub mod parser;

pub use classifier::{FrameKind, classify};
pub use command::{Command, EventSubtype, NewStyleCommand};
pub use frame::{hex_dump, parse_hex_frame};
pub use parser::{
    decode_button, decode_color_temperature, decode_device_state, decode_motion,
    decode_plain_state, decode_scene, decode_target_temperature, decode_temperature_limits,
    decode_thermostat_state,
};
