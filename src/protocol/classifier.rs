//! Frame classification.
//!
//! Frames are matched against an ordered table of positional byte patterns.
//! The first rule that matches wins, so more specific rules come before the
//! general ones they would otherwise be shadowed by.
//!
//! ```text
//! ┌────────┬──────┬────────┬──────┬─────────┬──────────────┐
//! │  addr  │  01  │ origin │ page │ command │  payload...  │
//! └────────┴──────┴────────┴──────┴─────────┴──────────────┘
//! ```

use std::fmt;

use crate::protocol::command::{
    BROADCAST_PREFIX, COLOR_TEMPERATURE_MARKER, Command, EventSubtype, MESH_MARKER,
    NewStyleCommand, ORIGIN_BROADCAST, PAGE_NEW_STYLE, PAGE_OLD_STYLE, SCENE_UPDATE_PREFIX,
    TIME_SYNC_PREFIX,
};

/// Command family selected for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Mesh time synchronisation.
    TimeSync,
    /// Scene update broadcast.
    SceneUpdate,
    /// Scene triggered broadcast.
    SceneTriggered,
    /// Identify buttons request.
    IdentifyRequest,
    /// Button press or release.
    Button,
    /// State with type-dependent data (dim, cover, thermostat).
    DeviceState,
    /// Plain on/off state.
    PlainState,
    /// Color temperature report.
    ColorTemperature,
    /// Thermostat target temperature.
    TargetTemperature,
    /// Thermostat turned off.
    ThermostatOff,
    /// Thermostat turned on.
    ThermostatOn,
    /// Thermostat temperature limits.
    TemperatureLimits,
    /// Motion with light level.
    Motion,
    /// Output switched off by timer.
    Timeout,
    /// New style event with an unknown subtype.
    UnknownNewStyle,
    /// Mesh command not otherwise recognised.
    UnknownOldStyle,
    /// Frame matching no known shape.
    Unrecognized,
}

impl FrameKind {
    /// Returns the label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TimeSync => "TIME DATA",
            Self::SceneUpdate => "SCENE UPDATE",
            Self::SceneTriggered => "SCENE TRIGGER",
            Self::IdentifyRequest => "IDENTIFY BUTTON REQUEST",
            Self::Button => "BUTTON",
            Self::DeviceState => "STATE DATA",
            Self::PlainState => "STATE",
            Self::ColorTemperature => "COLORTEMP",
            Self::TargetTemperature => "THERMOSTAT TARGET TEMP",
            Self::ThermostatOff => "THERMOSTAT STATE OFF",
            Self::ThermostatOn => "THERMOSTAT STATE ON",
            Self::TemperatureLimits => "THERMOSTAT LIMITS",
            Self::Motion => "MOTION",
            Self::Timeout => "TIMEOUT",
            Self::UnknownNewStyle => "UNKNOWN NEW STYLE",
            Self::UnknownOldStyle => "UNKNOWN OLD COMMAND",
            Self::Unrecognized => "UNKNOWN",
        }
    }

    /// Returns true if frames of this kind never carry state.
    #[must_use]
    pub const fn is_diagnostic_only(self) -> bool {
        matches!(
            self,
            Self::TimeSync
                | Self::IdentifyRequest
                | Self::Timeout
                | Self::UnknownNewStyle
                | Self::UnknownOldStyle
                | Self::Unrecognized
        )
    }

    /// Returns the originating address for frames that carry one.
    ///
    /// Button frames carry the address inside the payload; broadcast and
    /// unrecognised frames have none.
    #[must_use]
    pub fn address(self, frame: &[u8]) -> Option<u8> {
        match self {
            Self::TimeSync
            | Self::SceneUpdate
            | Self::SceneTriggered
            | Self::IdentifyRequest
            | Self::Unrecognized => None,
            Self::Button => frame.get(5).copied(),
            _ => frame.first().copied(),
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One positional element of a frame pattern.
#[derive(Debug, Clone, Copy)]
enum Byte {
    /// Any value.
    Any,
    /// Exactly this value.
    Is(u8),
    /// One of these values.
    OneOf(&'static [u8]),
}

impl Byte {
    fn matches(self, value: u8) -> bool {
        match self {
            Self::Any => true,
            Self::Is(expected) => value == expected,
            Self::OneOf(set) => set.contains(&value),
        }
    }
}

/// Constraint on the bytes following a pattern.
#[derive(Debug, Clone, Copy)]
enum Tail {
    /// No further bytes allowed.
    Exact,
    /// Any number of further bytes.
    Rest,
    /// At least this many further bytes.
    AtLeast(usize),
}

/// One classification rule.
#[derive(Debug)]
struct Rule {
    kind: FrameKind,
    pattern: &'static [Byte],
    tail: Tail,
}

impl Rule {
    fn matches(&self, frame: &[u8]) -> bool {
        let fixed = self.pattern.len();
        let length_ok = match self.tail {
            Tail::Exact => frame.len() == fixed,
            Tail::Rest => frame.len() >= fixed,
            Tail::AtLeast(n) => frame.len() >= fixed + n,
        };

        length_ok
            && self
                .pattern
                .iter()
                .zip(frame)
                .all(|(byte, &value)| byte.matches(value))
    }
}

use Byte::{Any, Is, OneOf};

const MESH: Byte = Is(MESH_MARKER);
const BROADCAST: Byte = Is(ORIGIN_BROADCAST);
const OLD_STYLE: Byte = Is(PAGE_OLD_STYLE);
const NEW_STYLE: Byte = Is(PAGE_NEW_STYLE);
const EVENT: Byte = Is(NewStyleCommand::Event as u8);

/// Classification rules in priority order.
const RULES: &[Rule] = &[
    Rule {
        kind: FrameKind::TimeSync,
        pattern: &[Is(TIME_SYNC_PREFIX), MESH, BROADCAST],
        tail: Tail::Rest,
    },
    Rule {
        kind: FrameKind::SceneUpdate,
        pattern: &[
            Is(SCENE_UPDATE_PREFIX),
            MESH,
            BROADCAST,
            OLD_STYLE,
            Is(Command::Scene as u8),
            Any,
        ],
        tail: Tail::Rest,
    },
    Rule {
        kind: FrameKind::SceneTriggered,
        pattern: &[
            Is(BROADCAST_PREFIX),
            MESH,
            BROADCAST,
            OLD_STYLE,
            Is(Command::Scene as u8),
            Any,
        ],
        tail: Tail::Rest,
    },
    Rule {
        kind: FrameKind::IdentifyRequest,
        pattern: &[
            Is(BROADCAST_PREFIX),
            MESH,
            BROADCAST,
            OLD_STYLE,
            Is(Command::Identify as u8),
        ],
        tail: Tail::Rest,
    },
    Rule {
        kind: FrameKind::Button,
        pattern: &[
            Is(BROADCAST_PREFIX),
            MESH,
            BROADCAST,
            OLD_STYLE,
            Is(Command::Button as u8),
            Any,
            Any,
        ],
        tail: Tail::Rest,
    },
    Rule {
        kind: FrameKind::DeviceState,
        pattern: &[
            Any,
            MESH,
            BROADCAST,
            OLD_STYLE,
            OneOf(&[Command::StateDim as u8, Command::StateData as u8]),
            Any,
            Any,
            Any,
        ],
        tail: Tail::Rest,
    },
    Rule {
        kind: FrameKind::PlainState,
        pattern: &[Any, MESH, BROADCAST, OLD_STYLE, Is(Command::State as u8), Any],
        tail: Tail::Rest,
    },
    Rule {
        kind: FrameKind::ColorTemperature,
        pattern: &[
            Any,
            MESH,
            BROADCAST,
            NEW_STYLE,
            EVENT,
            Any,
            Is(EventSubtype::ColorTemperature as u8),
            Is(COLOR_TEMPERATURE_MARKER),
        ],
        tail: Tail::Rest,
    },
    Rule {
        kind: FrameKind::TargetTemperature,
        pattern: &[
            Any,
            MESH,
            Any,
            NEW_STYLE,
            Is(NewStyleCommand::TargetTemperature as u8),
            Any,
            Any,
        ],
        tail: Tail::Exact,
    },
    Rule {
        kind: FrameKind::ThermostatOff,
        pattern: &[
            Any,
            MESH,
            Any,
            NEW_STYLE,
            Is(NewStyleCommand::ThermostatOff as u8),
            Any,
            Any,
        ],
        tail: Tail::Exact,
    },
    Rule {
        kind: FrameKind::ThermostatOn,
        pattern: &[
            Any,
            MESH,
            Any,
            NEW_STYLE,
            Is(NewStyleCommand::ThermostatOn as u8),
            Any,
            Any,
        ],
        tail: Tail::Exact,
    },
    Rule {
        kind: FrameKind::TemperatureLimits,
        pattern: &[
            Any,
            MESH,
            Any,
            NEW_STYLE,
            Is(NewStyleCommand::TemperatureLimits as u8),
            Any,
            Any,
            Any,
            Any,
            Any,
        ],
        tail: Tail::Exact,
    },
    Rule {
        kind: FrameKind::Motion,
        pattern: &[
            Any,
            MESH,
            BROADCAST,
            NEW_STYLE,
            EVENT,
            Any,
            Is(EventSubtype::Motion as u8),
            Any,
        ],
        tail: Tail::AtLeast(2),
    },
    Rule {
        kind: FrameKind::Timeout,
        pattern: &[
            Any,
            MESH,
            BROADCAST,
            NEW_STYLE,
            EVENT,
            Any,
            Is(EventSubtype::Timeout as u8),
        ],
        tail: Tail::Rest,
    },
    Rule {
        kind: FrameKind::UnknownNewStyle,
        pattern: &[Any, MESH, BROADCAST, NEW_STYLE, EVENT],
        tail: Tail::Rest,
    },
    Rule {
        kind: FrameKind::UnknownOldStyle,
        pattern: &[Any, MESH, BROADCAST, Any, Any],
        tail: Tail::Rest,
    },
];

/// Selects the command family for a frame.
///
/// Never fails: frames matching no rule are [`FrameKind::Unrecognized`].
#[must_use]
pub fn classify(frame: &[u8]) -> FrameKind {
    RULES
        .iter()
        .find(|rule| rule.matches(frame))
        .map_or(FrameKind::Unrecognized, |rule| rule.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_broadcasts() {
        assert_eq!(classify(&[0x01, 0x01, 0x10]), FrameKind::TimeSync);
        assert_eq!(
            classify(&[0x01, 0x01, 0x10, 0x00, 0xC8, 0x01, 0x00, 0x10]),
            FrameKind::TimeSync
        );
        assert_eq!(
            classify(&[0x02, 0x01, 0x10, 0x00, 0x21, 0x05]),
            FrameKind::SceneUpdate
        );
        assert_eq!(
            classify(&[0x00, 0x01, 0x10, 0x00, 0x21, 0x05, 0xAA]),
            FrameKind::SceneTriggered
        );
        assert_eq!(
            classify(&[0x00, 0x01, 0x10, 0x00, 0x15]),
            FrameKind::IdentifyRequest
        );
        assert_eq!(
            classify(&[0x00, 0x01, 0x10, 0x00, 0x16, 0x03, 0x07]),
            FrameKind::Button
        );
    }

    #[test]
    fn test_short_frame_falls_through() {
        // Scene without the scene byte is only an old style command.
        assert_eq!(
            classify(&[0x02, 0x01, 0x10, 0x00, 0x21]),
            FrameKind::UnknownOldStyle
        );
        // Button without the button byte.
        assert_eq!(
            classify(&[0x00, 0x01, 0x10, 0x00, 0x16, 0x03]),
            FrameKind::UnknownOldStyle
        );
        // State/dim missing data2.
        assert_eq!(
            classify(&[0x0A, 0x01, 0x10, 0x00, 0xC8, 0x01, 0x00]),
            FrameKind::UnknownOldStyle
        );
    }

    #[test]
    fn test_classify_state() {
        assert_eq!(
            classify(&[0x0A, 0x01, 0x10, 0x00, 0xC8, 0x01, 0x00, 0x2C]),
            FrameKind::DeviceState
        );
        assert_eq!(
            classify(&[0x0A, 0x01, 0x10, 0x00, 0x98, 0x00, 0x00, 0x00, 0x80]),
            FrameKind::DeviceState
        );
        assert_eq!(
            classify(&[0x0A, 0x01, 0x10, 0x00, 0x97, 0x01]),
            FrameKind::PlainState
        );
    }

    #[test]
    fn test_classify_thermostat_requires_exact_length() {
        assert_eq!(
            classify(&[0x0A, 0x01, 0x03, 0x04, 0x5C, 0x64, 0x00]),
            FrameKind::TargetTemperature
        );
        assert_eq!(
            classify(&[0x0A, 0x01, 0x10, 0x04, 0x5C, 0x64, 0x00, 0x00]),
            FrameKind::UnknownOldStyle
        );
        assert_eq!(
            classify(&[0x0A, 0x01, 0x00, 0x04, 0x5C, 0x64, 0x00, 0x00]),
            FrameKind::Unrecognized
        );
        assert_eq!(
            classify(&[0x0A, 0x01, 0x01, 0x04, 0x5F, 0x00, 0x00]),
            FrameKind::ThermostatOff
        );
        assert_eq!(
            classify(&[0x0A, 0x01, 0x10, 0x04, 0x7E, 0x00, 0x00]),
            FrameKind::ThermostatOn
        );
        assert_eq!(
            classify(&[0x0A, 0x01, 0x03, 0x04, 0x60, 0x01, 0x32, 0x00, 0xFA, 0x00]),
            FrameKind::TemperatureLimits
        );
    }

    #[test]
    fn test_classify_new_style_events() {
        assert_eq!(
            classify(&[0x0A, 0x01, 0x10, 0x04, 0x20, 0x00, 0x01, 0x11, 0x0A, 0x8C]),
            FrameKind::ColorTemperature
        );
        assert_eq!(
            classify(&[0x0A, 0x01, 0x10, 0x04, 0x20, 0x00, 0x03, 0x00, 0x01, 0x02]),
            FrameKind::Motion
        );
        // Motion needs two light-level bytes after the subtype byte.
        assert_eq!(
            classify(&[0x0A, 0x01, 0x10, 0x04, 0x20, 0x00, 0x03, 0x00, 0x01]),
            FrameKind::UnknownNewStyle
        );
        assert_eq!(
            classify(&[0x0A, 0x01, 0x10, 0x04, 0x20, 0x00, 0x05]),
            FrameKind::Timeout
        );
        assert_eq!(
            classify(&[0x0A, 0x01, 0x10, 0x04, 0x20]),
            FrameKind::UnknownNewStyle
        );
    }

    #[test]
    fn test_classify_unrecognized() {
        assert_eq!(classify(&[]), FrameKind::Unrecognized);
        assert_eq!(classify(&[0xFF, 0xFF, 0xFF]), FrameKind::Unrecognized);
        assert_eq!(classify(&[0x0A, 0x01, 0x10, 0x00]), FrameKind::Unrecognized);
    }

    #[test]
    fn test_frame_address() {
        let button = [0x00, 0x01, 0x10, 0x00, 0x16, 0x03, 0x07];
        assert_eq!(FrameKind::Button.address(&button), Some(3));
        assert_eq!(FrameKind::SceneUpdate.address(&[0x02]), None);
        assert_eq!(FrameKind::PlainState.address(&[0x0A]), Some(10));
    }
}
