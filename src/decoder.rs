//! Frame decoder entry point.
//!
//! [`parse_data`] classifies a frame, runs the matching field decoder and
//! reports the frame to a [`DiagnosticSink`]. It never fails: unknown,
//! truncated or otherwise odd frames decode to an empty [`StateUpdate`].
//!
//! ```
//! use std::collections::HashMap;
//! use plejd_mesh::{DeviceType, MeshDecoder};
//!
//! let mut devices: HashMap<u8, DeviceType> = HashMap::new();
//! devices.insert(10, DeviceType::Thermostat);
//!
//! let decoder = MeshDecoder::new(devices);
//! let update = decoder.decode(&[0x0A, 0x01, 0x10, 0x04, 0x5C, 0x64, 0x00]);
//! assert_eq!(update.address, Some(10));
//! assert_eq!(update.target_temperature, Some(10.0));
//! ```

use crate::config::DecoderConfig;
use crate::diagnostic::{DiagnosticSink, TAG_SCENE, TAG_TIME, Tag, TracingSink};
use crate::error::Result;
use crate::protocol::command::{Command, NewStyleCommand, PAGE_NEW_STYLE, PAGE_OLD_STYLE};
use crate::protocol::{
    FrameKind, classify, decode_button, decode_color_temperature, decode_device_state,
    decode_motion, decode_plain_state, decode_scene, decode_target_temperature,
    decode_temperature_limits, decode_thermostat_state, hex_dump, parse_hex_frame,
};
use crate::types::{DeviceType, DeviceTypeLookup, StateUpdate};

/// Decodes one frame using the given device types, reporting to `sink`.
///
/// Equivalent to [`MeshDecoder::decode`] with the default configuration.
pub fn parse_data<L>(frame: &[u8], device_types: &L, sink: &dyn DiagnosticSink) -> StateUpdate
where
    L: DeviceTypeLookup + ?Sized,
{
    decode_frame(frame, device_types, sink, &DecoderConfig::default()).1
}

/// Decoder bundling a device-type lookup, a diagnostic sink and settings.
#[derive(Debug, Clone)]
pub struct MeshDecoder<L, S = TracingSink> {
    lookup: L,
    sink: S,
    config: DecoderConfig,
}

impl<L: DeviceTypeLookup> MeshDecoder<L> {
    /// Creates a decoder that reports diagnostics through `tracing`.
    #[must_use]
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            sink: TracingSink,
            config: DecoderConfig::default(),
        }
    }
}

impl<L, S> MeshDecoder<L, S> {
    /// Replaces the diagnostic sink.
    #[must_use]
    pub fn with_sink<T>(self, sink: T) -> MeshDecoder<L, T> {
        MeshDecoder {
            lookup: self.lookup,
            sink,
            config: self.config,
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub const fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the device-type lookup.
    pub const fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Returns the diagnostic sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &DecoderConfig {
        &self.config
    }
}

impl<L: DeviceTypeLookup, S: DiagnosticSink> MeshDecoder<L, S> {
    /// Decodes one frame.
    pub fn decode(&self, frame: &[u8]) -> StateUpdate {
        self.decode_classified(frame).1
    }

    /// Decodes one frame and also returns the command family it matched.
    pub fn decode_classified(&self, frame: &[u8]) -> (FrameKind, StateUpdate) {
        decode_frame(frame, &self.lookup, &self.sink, &self.config)
    }

    /// Decodes one hex-encoded frame, as found in logs and captures.
    pub fn decode_hex(&self, frame: &str) -> Result<StateUpdate> {
        let frame = parse_hex_frame(frame)?;
        Ok(self.decode(&frame))
    }
}

fn decode_frame<L>(
    frame: &[u8],
    lookup: &L,
    sink: &dyn DiagnosticSink,
    config: &DecoderConfig,
) -> (FrameKind, StateUpdate)
where
    L: DeviceTypeLookup + ?Sized,
{
    let kind = classify(frame);
    let tag = diagnostic_tag(kind, frame);

    let update = match kind {
        FrameKind::SceneUpdate | FrameKind::SceneTriggered => decode_scene(frame),
        FrameKind::Button => decode_button(frame),
        FrameKind::DeviceState => {
            let device_type = frame.first().and_then(|&addr| lookup.device_type(addr));
            if !matches!(
                device_type,
                Some(DeviceType::Cover | DeviceType::Thermostat)
            ) {
                let name = device_type.map_or("none", DeviceType::as_str);
                sink.record(tag, &format!("unhandled device type {name}, using dim"));
            }
            decode_device_state(frame, device_type)
        }
        FrameKind::PlainState => decode_plain_state(frame),
        FrameKind::ColorTemperature => decode_color_temperature(frame),
        FrameKind::TargetTemperature => decode_target_temperature(frame),
        FrameKind::ThermostatOff => decode_thermostat_state(frame, false),
        FrameKind::ThermostatOn => decode_thermostat_state(frame, true),
        FrameKind::TemperatureLimits => decode_temperature_limits(frame),
        FrameKind::Motion => decode_motion(frame),
        FrameKind::TimeSync
        | FrameKind::IdentifyRequest
        | FrameKind::Timeout
        | FrameKind::UnknownNewStyle
        | FrameKind::UnknownOldStyle
        | FrameKind::Unrecognized => StateUpdate::default(),
    };

    sink.record(tag, &describe(kind, frame, &update));
    if config.hex_dump {
        sink.record(tag, &format!("    {}", hex_dump(frame)));
    }

    (kind, update)
}

fn diagnostic_tag(kind: FrameKind, frame: &[u8]) -> Option<Tag> {
    match kind {
        FrameKind::TimeSync => Some(Tag::Category(TAG_TIME)),
        FrameKind::SceneUpdate | FrameKind::SceneTriggered => Some(Tag::Category(TAG_SCENE)),
        _ => kind.address(frame).map(Tag::Address),
    }
}

/// Builds the one-line summary recorded for every frame.
fn describe(kind: FrameKind, frame: &[u8], update: &StateUpdate) -> String {
    match (kind, frame) {
        (FrameKind::UnknownOldStyle, [_, _, _, page, command, extra @ ..]) => {
            // Shape of a known command that fell through, usually truncated.
            let known = match *page {
                PAGE_OLD_STYLE => Command::from_byte(*command).map(|c| format!(" ({c:?}?)")),
                PAGE_NEW_STYLE => {
                    NewStyleCommand::from_byte(*command).map(|c| format!(" ({c:?}?)"))
                }
                _ => None,
            };
            format!(
                "{kind} cmd=({page:02x}, {command:02x}){} extra={}",
                known.unwrap_or_default(),
                hex_dump(extra)
            )
        }
        (FrameKind::Unrecognized, _) => format!("{kind} len={}", frame.len()),
        _ if kind.is_diagnostic_only() => {
            let header = match kind {
                FrameKind::TimeSync => 3,
                FrameKind::Timeout => 7,
                _ => 5,
            };
            format!("{kind} extra={}", hex_dump(frame.get(header..).unwrap_or_default()))
        }
        _ => format!("{kind} {update}"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::diagnostic::NullSink;
    use crate::diagnostic::tests::RecordingSink;
    use crate::types::{ButtonAction, State};

    fn covers() -> HashMap<u8, DeviceType> {
        HashMap::from([(10, DeviceType::Cover), (11, DeviceType::Thermostat)])
    }

    #[test]
    fn test_documented_frames() {
        let devices = covers();
        let decode = |frame: &[u8]| parse_data(frame, &devices, &NullSink);

        let scene = decode(&[0x02, 0x01, 0x10, 0x00, 0x21, 0x05]);
        assert_eq!(
            scene,
            StateUpdate {
                scene: Some(5),
                triggered: Some(true),
                ..StateUpdate::default()
            }
        );

        let release = decode(&[0x00, 0x01, 0x10, 0x00, 0x16, 0x03, 0x07, 0x00]);
        assert_eq!(
            release,
            StateUpdate {
                button: Some(7),
                action: Some(ButtonAction::Release),
                ..StateUpdate::for_address(3)
            }
        );

        let press = decode(&[0x00, 0x01, 0x10, 0x00, 0x16, 0x03, 0x07]);
        assert_eq!(press.action, Some(ButtonAction::Press));

        let target = decode(&[0x0A, 0x01, 0x10, 0x04, 0x5C, 0x64, 0x00]);
        assert_eq!(
            target,
            StateUpdate {
                target_temperature: Some(10.0),
                ..StateUpdate::for_address(10)
            }
        );

        let cover = decode(&[0x0A, 0x01, 0x10, 0x00, 0xC8, 0x01, 0x00, 0x2C]);
        assert_eq!(
            cover,
            StateUpdate {
                state: Some(State::Raw(1)),
                cover_position: Some(0x2C00),
                ..StateUpdate::for_address(10)
            }
        );

        let angled = decode(&[0x0A, 0x01, 0x10, 0x00, 0xC8, 0x01, 0x00, 0x26, 0x21]);
        assert_eq!(angled.cover_position, Some(0x2600));
        assert_eq!(angled.cover_angle, Some(-30));

        assert!(decode(&[0xFF, 0xFF, 0xFF]).is_empty());
    }

    #[test]
    fn test_diagnostic_only_frames_are_empty() {
        let devices = covers();
        for frame in [
            &[0x01, 0x01, 0x10, 0x12, 0x34][..],
            &[0x00, 0x01, 0x10, 0x00, 0x15, 0x01],
            &[0x0A, 0x01, 0x10, 0x04, 0x20, 0x00, 0x05, 0x00],
            &[0x0A, 0x01, 0x10, 0x04, 0x20, 0x00, 0x09],
            &[0x0A, 0x01, 0x10, 0x00, 0x42, 0x01],
            &[],
            &[0x0A],
        ] {
            assert!(parse_data(frame, &devices, &NullSink).is_empty(), "{frame:02x?}");
        }
    }

    #[test]
    fn test_decode_classified() {
        let decoder = MeshDecoder::new(covers()).with_sink(NullSink);
        let (kind, update) = decoder.decode_classified(&[0x0A, 0x01, 0x10, 0x00, 0x97, 0x00]);
        assert_eq!(kind, FrameKind::PlainState);
        assert_eq!(update.state, Some(State::Raw(0)));
    }

    #[test]
    fn test_thermostat_frames() {
        let decoder = MeshDecoder::new(covers()).with_sink(NullSink);

        let state = decoder.decode(&[0x0B, 0x01, 0x10, 0x00, 0x98, 0x01, 0x00, 0x1D, 0x80]);
        assert_eq!(state.current_temperature, Some(19));
        assert_eq!(state.heating, Some(true));

        let off = decoder.decode(&[0x0B, 0x01, 0x00, 0x04, 0x5F, 0x00, 0x00]);
        assert_eq!(off.state, Some(State::Flag(false)));

        let on = decoder.decode(&[0x0B, 0x01, 0x01, 0x04, 0x7E, 0x00, 0x00]);
        assert_eq!(on.state, Some(State::Flag(true)));

        let limits = decoder
            .decode_hex("0b 01 03 04 60 01 32 00 fa 00")
            .unwrap();
        assert_eq!(limits.min_temperature, Some(5.0));
        assert_eq!(limits.max_temperature, Some(25.0));
    }

    #[test]
    fn test_unknown_address_falls_back_to_dim() {
        let devices: HashMap<u8, DeviceType> = HashMap::new();
        for data2 in [0x00, 0x2C, 0xFF] {
            let frame = [0x2A, 0x01, 0x10, 0x00, 0xC8, 0x01, 0x00, data2, 0x21];
            let update = parse_data(&frame, &devices, &NullSink);
            assert_eq!(update.dim, Some(data2));
            assert_eq!(update.cover_position, None);
            assert_eq!(update.current_temperature, None);
        }
    }

    #[test]
    fn test_decode_is_idempotent() {
        let decoder = MeshDecoder::new(covers()).with_sink(NullSink);
        let frame = [0x0A, 0x01, 0x10, 0x00, 0xC8, 0x01, 0x00, 0x26, 0x21];
        assert_eq!(decoder.decode(&frame), decoder.decode(&frame));
    }

    #[test]
    fn test_decode_never_panics() {
        let decoder = MeshDecoder::new(covers()).with_sink(NullSink);
        let prefixes: [&[u8]; 6] = [
            &[0x00, 0x01, 0x10, 0x00],
            &[0x0A, 0x01, 0x10, 0x00],
            &[0x0B, 0x01, 0x10, 0x00],
            &[0x0A, 0x01, 0x10, 0x04],
            &[0x0A, 0x01, 0x03, 0x04],
            &[0x02, 0x01, 0x10, 0x00],
        ];

        for prefix in prefixes {
            for command in 0..=u8::MAX {
                for tail_len in 0..8 {
                    let mut frame = prefix.to_vec();
                    frame.push(command);
                    frame.extend((0..tail_len).map(|i| command.wrapping_add(i)));
                    let _ = decoder.decode(&frame);
                    let _ = decoder.decode(&frame[..frame.len() - 1]);
                }
            }
        }
    }

    #[test]
    fn test_diagnostics_are_tagged() {
        let sink = RecordingSink::default();
        let decoder = MeshDecoder::new(covers()).with_sink(&sink);

        decoder.decode(&[0x02, 0x01, 0x10, 0x00, 0x21, 0x05]);
        decoder.decode(&[0x01, 0x01, 0x10, 0xAB]);
        decoder.decode(&[0x2A, 0x01, 0x10, 0x00, 0xC8, 0x01, 0x00, 0x40]);
        decoder.decode(&[0xFF, 0xFF]);

        let records = sink.records();
        assert_eq!(
            records[0],
            (
                Some(Tag::Category(TAG_SCENE)),
                "SCENE UPDATE scene=5 triggered=true".into()
            )
        );
        assert_eq!(
            records[1],
            (Some(Tag::Category(TAG_SCENE)), "    020110002105".into())
        );
        assert_eq!(records[2].0, Some(Tag::Category(TAG_TIME)));
        assert_eq!(records[2].1, "TIME DATA extra=ab");
        assert_eq!(records[4].0, Some(Tag::Address(0x2A)));
        assert_eq!(records[4].1, "unhandled device type none, using dim");
        assert_eq!(records[7], (None, "UNKNOWN len=2".into()));
    }

    #[test]
    fn test_hex_dump_can_be_disabled() {
        let sink = RecordingSink::default();
        let decoder = MeshDecoder::new(covers())
            .with_sink(&sink)
            .with_config(DecoderConfig::new().hex_dump(false));

        decoder.decode(&[0x0A, 0x01, 0x10, 0x00, 0x42, 0x01]);

        assert_eq!(
            sink.records(),
            vec![(
                Some(Tag::Address(0x0A)),
                "UNKNOWN OLD COMMAND cmd=(00, 42) extra=01".into()
            )]
        );
    }

    #[test]
    fn test_truncated_command_is_named() {
        let sink = RecordingSink::default();
        let decoder = MeshDecoder::new(covers())
            .with_sink(&sink)
            .with_config(DecoderConfig::new().hex_dump(false));

        decoder.decode(&[0x0A, 0x01, 0x10, 0x00, 0xC8, 0x01]);

        assert_eq!(
            sink.records()[0].1,
            "UNKNOWN OLD COMMAND cmd=(00, c8) (StateDim?) extra=01"
        );
    }
}
