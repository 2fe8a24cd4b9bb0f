//! Shared device-type registry.
//!
//! The registry is filled as devices are discovered and read by the decoder
//! for every state frame. Clones share the same underlying map.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::types::{DeviceAddress, DeviceType, DeviceTypeLookup};

/// Clonable, thread-safe map of device address to device type.
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    devices: Arc<RwLock<HashMap<DeviceAddress, DeviceType>>>,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or reclassifies a device.
    ///
    /// Returns the previous type if the address was already known.
    pub fn register(&self, address: DeviceAddress, device_type: DeviceType) -> Option<DeviceType> {
        let previous = self
            .devices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(address, device_type);

        match previous {
            Some(old) if old != device_type => {
                tracing::debug!("device 0x{address:02x} reclassified from {old} to {device_type}");
            }
            None => tracing::debug!("registered device 0x{address:02x} as {device_type}"),
            Some(_) => {}
        }

        previous
    }

    /// Removes a device.
    pub fn remove(&self, address: DeviceAddress) -> Option<DeviceType> {
        self.devices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&address)
    }

    /// Returns the number of known devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no devices are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the current map.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<DeviceAddress, DeviceType> {
        self.devices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DeviceTypeLookup for DeviceRegistry {
    fn device_type(&self, address: DeviceAddress) -> Option<DeviceType> {
        self.devices
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&address)
            .copied()
    }
}

impl FromIterator<(DeviceAddress, DeviceType)> for DeviceRegistry {
    fn from_iter<I: IntoIterator<Item = (DeviceAddress, DeviceType)>>(iter: I) -> Self {
        Self {
            devices: Arc::new(RwLock::new(iter.into_iter().collect())),
        }
    }
}
