//! Device addressing and classification.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::Error;

/// Single-byte address of a device on the mesh.
pub type DeviceAddress = u8;

/// Kind of physical device behind a mesh address.
///
/// Supplied by an external registry. The decoder only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    /// Dimmable or switched light output.
    Light,
    /// Button, motion or light-level sensor.
    Sensor,
    /// Blind or cover with position and tilt.
    Cover,
    /// Floor or room heating thermostat.
    Thermostat,
    /// Known to the registry but not classified.
    Unknown,
}

impl DeviceType {
    /// Returns the registry name of this device type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "LIGHT",
            Self::Sensor => "SENSOR",
            Self::Cover => "COVER",
            Self::Thermostat => "THERMOSTAT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LIGHT" => Ok(Self::Light),
            "SENSOR" => Ok(Self::Sensor),
            "COVER" => Ok(Self::Cover),
            "THERMOSTAT" => Ok(Self::Thermostat),
            "UNKNOWN" => Ok(Self::Unknown),
            _ => Err(Error::UnknownDeviceType { name: s.into() }),
        }
    }
}

/// Read-only lookup of device type by address.
///
/// `None` means the address has not been discovered yet, which is a normal
/// condition and not an error.
pub trait DeviceTypeLookup {
    /// Returns the device type registered for `address`, if any.
    fn device_type(&self, address: DeviceAddress) -> Option<DeviceType>;
}

impl<S: BuildHasher> DeviceTypeLookup for HashMap<DeviceAddress, DeviceType, S> {
    fn device_type(&self, address: DeviceAddress) -> Option<DeviceType> {
        self.get(&address).copied()
    }
}

impl DeviceTypeLookup for BTreeMap<DeviceAddress, DeviceType> {
    fn device_type(&self, address: DeviceAddress) -> Option<DeviceType> {
        self.get(&address).copied()
    }
}

impl<T: DeviceTypeLookup + ?Sized> DeviceTypeLookup for &T {
    fn device_type(&self, address: DeviceAddress) -> Option<DeviceType> {
        (**self).device_type(address)
    }
}

impl<T: DeviceTypeLookup + ?Sized> DeviceTypeLookup for Arc<T> {
    fn device_type(&self, address: DeviceAddress) -> Option<DeviceType> {
        (**self).device_type(address)
    }
}
