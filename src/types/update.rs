//! Decoded state updates.

use std::fmt;

use crate::types::device::DeviceAddress;

/// Reported on/off state of a device.
///
/// Light and cover frames carry the raw state byte; thermostat frames
/// carry an explicit on/off flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Raw state byte from a state/dim frame.
    Raw(u8),
    /// Explicit on/off from a thermostat frame.
    Flag(bool),
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(value) => write!(f, "{value}"),
            Self::Flag(on) => write!(f, "{on}"),
        }
    }
}

impl State {
    /// Returns true if the device reports itself as on.
    #[must_use]
    pub const fn is_on(self) -> bool {
        match self {
            Self::Raw(value) => value != 0,
            Self::Flag(on) => on,
        }
    }
}

/// Button edge reported by a wall switch or remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    /// Button pressed.
    Press,
    /// Button released.
    Release,
}

impl ButtonAction {
    /// Returns the action name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Press => "press",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State carried by one decoded frame.
///
/// Every field is optional; each command family fills a different subset.
/// An update with no fields set means the frame carried nothing actionable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    /// Originating device.
    pub address: Option<DeviceAddress>,
    /// On/off state.
    pub state: Option<State>,
    /// Dimming level (0-255).
    pub dim: Option<u8>,
    /// Cover position.
    pub cover_position: Option<i16>,
    /// Cover tilt angle (-31..=31).
    pub cover_angle: Option<i8>,
    /// Measured temperature in Celsius.
    pub current_temperature: Option<i8>,
    /// Heating active. Best-effort, see [`crate::protocol::parser`].
    pub heating: Option<bool>,
    /// Thermostat setpoint in Celsius (0.1 resolution).
    pub target_temperature: Option<f32>,
    /// Lowest allowed setpoint in Celsius.
    pub min_temperature: Option<f32>,
    /// Highest allowed setpoint in Celsius.
    pub max_temperature: Option<f32>,
    /// Scene index.
    pub scene: Option<u8>,
    /// Scene was triggered.
    pub triggered: Option<bool>,
    /// Button index on the originating device.
    pub button: Option<u8>,
    /// Button edge.
    pub action: Option<ButtonAction>,
    /// Motion detected.
    pub motion: Option<bool>,
    /// Ambient light level (raw sensor units).
    pub luminance: Option<u16>,
    /// Color temperature in Kelvin.
    pub temperature: Option<u64>,
}

impl StateUpdate {
    /// Creates an update for the given address.
    #[must_use]
    pub fn for_address(address: DeviceAddress) -> Self {
        Self {
            address: Some(address),
            ..Self::default()
        }
    }

    /// Returns true if the frame carried no actionable state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlays the fields set in `other` onto this update.
    ///
    /// Fields absent from `other` keep their current value.
    pub fn merge(&mut self, other: &Self) {
        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field;
                    }
                )*
            };
        }

        overlay!(
            address,
            state,
            dim,
            cover_position,
            cover_angle,
            current_temperature,
            heating,
            target_temperature,
            min_temperature,
            max_temperature,
            scene,
            triggered,
            button,
            action,
            motion,
            luminance,
            temperature,
        );
    }
}

impl fmt::Display for StateUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Vec::new();
        if let Some(address) = self.address {
            fields.push(format!("address=0x{address:02x}"));
        }

        macro_rules! push {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = self.$field {
                        fields.push(format!(concat!(stringify!($field), "={}"), value));
                    }
                )*
            };
        }

        push!(
            state,
            dim,
            cover_position,
            cover_angle,
            current_temperature,
            heating,
            target_temperature,
            min_temperature,
            max_temperature,
            scene,
            triggered,
            button,
            action,
            motion,
            luminance,
            temperature,
        );

        f.write_str(&fields.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_on() {
        assert!(State::Raw(1).is_on());
        assert!(!State::Raw(0).is_on());
        assert!(State::Flag(true).is_on());
        assert!(!State::Flag(false).is_on());
    }

    #[test]
    fn test_button_action_str() {
        assert_eq!(ButtonAction::Press.as_str(), "press");
        assert_eq!(ButtonAction::Release.to_string(), "release");
    }

    #[test]
    fn test_empty_update() {
        assert!(StateUpdate::default().is_empty());
        assert!(!StateUpdate::for_address(3).is_empty());
    }

    #[test]
    fn test_display_lists_set_fields() {
        let update = StateUpdate {
            button: Some(7),
            action: Some(ButtonAction::Release),
            ..StateUpdate::for_address(3)
        };
        assert_eq!(update.to_string(), "address=0x03 button=7 action=release");
        assert_eq!(StateUpdate::default().to_string(), "");
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut current = StateUpdate {
            address: Some(7),
            target_temperature: Some(21.5),
            state: Some(State::Flag(true)),
            ..StateUpdate::default()
        };
        let incoming = StateUpdate {
            address: Some(7),
            current_temperature: Some(19),
            heating: Some(true),
            state: Some(State::Raw(0)),
            ..StateUpdate::default()
        };

        current.merge(&incoming);

        assert_eq!(current.target_temperature, Some(21.5));
        assert_eq!(current.current_temperature, Some(19));
        assert_eq!(current.heating, Some(true));
        assert_eq!(current.state, Some(State::Raw(0)));
    }
}
