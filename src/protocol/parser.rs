//! Field decoders for each command family.
//!
//! Each decoder takes the whole frame and returns the fields it carries.
//! The classifier guarantees the frame shape, but every decoder still
//! returns an empty update rather than panicking if handed a frame of
//! another family.

use bytes::Buf;

use crate::types::{ButtonAction, DeviceType, State, StateUpdate};

/// Offset subtracted from the 6-bit thermostat temperature.
const TEMPERATURE_OFFSET: i8 = 10;

/// Mask for the 6-bit thermostat temperature.
const TEMPERATURE_MASK: u8 = 0x3F;

/// Trailing byte value reported while a thermostat is heating.
///
/// Observed on live devices but not confirmed; treat as best-effort.
const HEATING_FLAG: u8 = 0x80;

/// Sign bit of the 6-bit cover angle.
const ANGLE_SIGN_BIT: u8 = 0x20;

/// Magnitude mask of the 6-bit cover angle.
const ANGLE_MASK: u8 = 0x1F;

/// Thermostat temperatures are sent in tenths of a degree.
const DECI_DEGREES: f32 = 10.0;

/// Decodes a 6-bit signed cover angle.
///
/// When the sign bit is set the byte is inverted before masking, so
/// `0x21` decodes to `-30` and `0x05` to `5`.
#[must_use]
pub const fn decode_cover_angle(byte: u8) -> i8 {
    if byte & ANGLE_SIGN_BIT != 0 {
        -((!byte & ANGLE_MASK) as i8)
    } else {
        (byte & ANGLE_MASK) as i8
    }
}

/// Decodes the modulo-64 thermostat temperature with its 10 degree offset.
#[must_use]
pub const fn decode_current_temperature(byte: u8) -> i8 {
    (byte & TEMPERATURE_MASK) as i8 - TEMPERATURE_OFFSET
}

/// Reads a little-endian tenths-of-a-degree temperature.
fn read_deci_degrees(buf: &mut impl Buf) -> f32 {
    f32::from(buf.get_u16_le()) / DECI_DEGREES
}

/// Decodes a scene update or scene trigger.
///
/// Format: `<02|00> 01 10 00 21 <scene> [extra...]`
#[must_use]
pub fn decode_scene(frame: &[u8]) -> StateUpdate {
    let [_, _, _, _, _, scene, ..] = *frame else {
        return StateUpdate::default();
    };

    StateUpdate {
        scene: Some(scene),
        triggered: Some(true),
        ..StateUpdate::default()
    }
}

/// Decodes a button press or release.
///
/// Format: `00 01 10 00 16 <addr> <button> [flag] [extra...]`
///
/// A release is signalled by a flag byte of `0`; a missing flag is a press.
#[must_use]
pub fn decode_button(frame: &[u8]) -> StateUpdate {
    let [_, _, _, _, _, addr, button, ref extra @ ..] = *frame else {
        return StateUpdate::default();
    };

    let action = match extra.first() {
        Some(0) => ButtonAction::Release,
        _ => ButtonAction::Press,
    };

    StateUpdate {
        button: Some(button),
        action: Some(action),
        ..StateUpdate::for_address(addr)
    }
}

/// Decodes a state frame whose data bytes depend on the device type.
///
/// Format: `<addr> 01 10 00 <C8|98> <state> <data1> <data2> [extra...]`
///
/// - [`DeviceType::Cover`]: position is `data1..=data2` as signed
///   little-endian, angle is the first extra byte if present.
/// - [`DeviceType::Thermostat`]: current temperature from `data2`; heating
///   when the first extra byte is `0x80` (unverified).
/// - Anything else, including unknown addresses: `data2` is the dim level.
///   Lights are sometimes reported as sensors, so this is the fallback.
#[must_use]
pub fn decode_device_state(frame: &[u8], device_type: Option<DeviceType>) -> StateUpdate {
    let [addr, _, _, _, _, state, data1, data2, ref extra @ ..] = *frame else {
        return StateUpdate::default();
    };

    let base = StateUpdate {
        state: Some(State::Raw(state)),
        ..StateUpdate::for_address(addr)
    };

    match device_type {
        Some(DeviceType::Cover) => StateUpdate {
            cover_position: Some(i16::from_le_bytes([data1, data2])),
            cover_angle: extra.first().map(|&byte| decode_cover_angle(byte)),
            ..base
        },
        Some(DeviceType::Thermostat) => StateUpdate {
            current_temperature: Some(decode_current_temperature(data2)),
            heating: Some(extra.first() == Some(&HEATING_FLAG)),
            ..base
        },
        Some(DeviceType::Light | DeviceType::Sensor | DeviceType::Unknown) | None => StateUpdate {
            dim: Some(data2),
            ..base
        },
    }
}

/// Decodes a plain state frame.
///
/// Format: `<addr> 01 10 00 97 <state> [extra...]`
#[must_use]
pub fn decode_plain_state(frame: &[u8]) -> StateUpdate {
    let [addr, _, _, _, _, state, ..] = *frame else {
        return StateUpdate::default();
    };

    StateUpdate {
        state: Some(State::Raw(state)),
        ..StateUpdate::for_address(addr)
    }
}

/// Decodes a color temperature report.
///
/// Format: `<addr> 01 10 04 20 <a> 01 11 <ct...>`
///
/// The value is big-endian over all remaining bytes; an empty value is 0.
/// Values longer than eight bytes keep their low-order 64 bits.
#[must_use]
pub fn decode_color_temperature(frame: &[u8]) -> StateUpdate {
    let [addr, _, _, _, _, _, _, _, ref value @ ..] = *frame else {
        return StateUpdate::default();
    };

    let kelvin = value
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));

    StateUpdate {
        temperature: Some(kelvin),
        ..StateUpdate::for_address(addr)
    }
}

/// Decodes a thermostat target temperature.
///
/// Format: `<addr> 01 <origin> 04 5c <lo> <hi>`
///
/// The origin byte is `0x10` when set on the device, `0x00`/`0x01` when set
/// from the app and `0x03` when answering a query. It is not validated.
#[must_use]
pub fn decode_target_temperature(frame: &[u8]) -> StateUpdate {
    let [addr, _, _, _, _, ref value @ ..] = *frame else {
        return StateUpdate::default();
    };
    if value.len() < 2 {
        return StateUpdate::default();
    }

    let mut cursor = value;
    StateUpdate {
        target_temperature: Some(read_deci_degrees(&mut cursor)),
        ..StateUpdate::for_address(addr)
    }
}

/// Decodes a thermostat on/off frame.
///
/// Format: `<addr> 01 <origin> 04 <5f|7e> <lo> <hi>`
#[must_use]
pub fn decode_thermostat_state(frame: &[u8], on: bool) -> StateUpdate {
    let Some(&addr) = frame.first() else {
        return StateUpdate::default();
    };

    StateUpdate {
        state: Some(State::Flag(on)),
        ..StateUpdate::for_address(addr)
    }
}

/// Decodes thermostat setpoint limits.
///
/// Format: `<addr> 01 <origin> 04 60 <sub> <min:2LE> <max:2LE>`
#[must_use]
pub fn decode_temperature_limits(frame: &[u8]) -> StateUpdate {
    let [addr, _, _, _, _, _sub_id, ref limits @ ..] = *frame else {
        return StateUpdate::default();
    };
    if limits.len() < 4 {
        return StateUpdate::default();
    }

    let mut cursor = limits;
    let min_temperature = read_deci_degrees(&mut cursor);
    let max_temperature = read_deci_degrees(&mut cursor);

    StateUpdate {
        min_temperature: Some(min_temperature),
        max_temperature: Some(max_temperature),
        ..StateUpdate::for_address(addr)
    }
}

/// Decodes a motion event.
///
/// Format: `<addr> 01 10 04 20 <a> 03 <b> [extra...] <light:2BE>`
#[must_use]
pub fn decode_motion(frame: &[u8]) -> StateUpdate {
    let [addr, _, _, _, _, _, _, _, .., ll1, ll2] = *frame else {
        return StateUpdate::default();
    };

    StateUpdate {
        motion: Some(true),
        luminance: Some(u16::from_be_bytes([ll1, ll2])),
        ..StateUpdate::for_address(addr)
    }
}
