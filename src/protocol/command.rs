//! Command bytes of the Plejd mesh protocol.
//!
//! Most frames start with `<addr> 01 <origin> <page> <command>`. Page `0x00`
//! carries the older single-byte commands, page `0x04` the newer ones.

/// Second byte of every mesh frame.
pub const MESH_MARKER: u8 = 0x01;

/// Origin byte of frames broadcast by a device.
pub const ORIGIN_BROADCAST: u8 = 0x10;

/// Command page for old style commands.
pub const PAGE_OLD_STYLE: u8 = 0x00;

/// Command page for new style commands.
pub const PAGE_NEW_STYLE: u8 = 0x04;

/// Leading byte of time sync frames.
pub const TIME_SYNC_PREFIX: u8 = 0x01;

/// Leading byte of scene update frames.
pub const SCENE_UPDATE_PREFIX: u8 = 0x02;

/// Leading byte of broadcast frames without a device address.
pub const BROADCAST_PREFIX: u8 = 0x00;

/// Old style command bytes (page `0x00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// Identify buttons request.
    Identify = 0x15,
    /// Button pressed or released.
    Button = 0x16,
    /// Scene triggered or updated.
    Scene = 0x21,
    /// Plain on/off state.
    State = 0x97,
    /// State with data, alternate form.
    StateData = 0x98,
    /// State with data (dim level, cover position or temperature).
    StateDim = 0xC8,
}

/// New style command bytes (page `0x04`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NewStyleCommand {
    /// Sensor or output event, followed by an event subtype.
    Event = 0x20,
    /// Thermostat target temperature.
    TargetTemperature = 0x5C,
    /// Thermostat turned off.
    ThermostatOff = 0x5F,
    /// Thermostat temperature limits.
    TemperatureLimits = 0x60,
    /// Thermostat turned on.
    ThermostatOn = 0x7E,
}

/// Subtypes of [`NewStyleCommand::Event`] frames, found at offset 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventSubtype {
    /// Color temperature report, followed by `0x11`.
    ColorTemperature = 0x01,
    /// Motion with light level.
    Motion = 0x03,
    /// Output switched off by timer.
    Timeout = 0x05,
}

/// Byte following [`EventSubtype::ColorTemperature`].
pub const COLOR_TEMPERATURE_MARKER: u8 = 0x11;

impl Command {
    /// Converts a byte to a command.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x15 => Some(Self::Identify),
            0x16 => Some(Self::Button),
            0x21 => Some(Self::Scene),
            0x97 => Some(Self::State),
            0x98 => Some(Self::StateData),
            0xC8 => Some(Self::StateDim),
            _ => None,
        }
    }
}

impl NewStyleCommand {
    /// Converts a byte to a new style command.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x20 => Some(Self::Event),
            0x5C => Some(Self::TargetTemperature),
            0x5F => Some(Self::ThermostatOff),
            0x60 => Some(Self::TemperatureLimits),
            0x7E => Some(Self::ThermostatOn),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_from_byte() {
        assert_eq!(Command::from_byte(0xC8), Some(Command::StateDim));
        assert_eq!(Command::from_byte(0x98), Some(Command::StateData));
        assert_eq!(Command::from_byte(0x00), None);
    }

    #[test]
    fn test_new_style_from_byte() {
        assert_eq!(
            NewStyleCommand::from_byte(0x5C),
            Some(NewStyleCommand::TargetTemperature)
        );
        assert_eq!(NewStyleCommand::from_byte(0x61), None);
    }
}
