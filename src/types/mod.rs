//! Data types for Plejd mesh devices and decoded updates.
//!
//! This module contains the core data structures used throughout the library:
//! - Device addresses and device types
//! - Decoded state updates

pub mod device;
pub mod update;

pub use device::{DeviceAddress, DeviceType, DeviceTypeLookup};
pub use update::{ButtonAction, State, StateUpdate};
