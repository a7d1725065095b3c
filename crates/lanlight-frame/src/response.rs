use std::time::Instant;

use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::command::{command_name, Command};
use crate::convert::{u16_at, u32_at};
use crate::header::{COMMAND_OFFSET, HEADER_SIZE, SEQUENCE_OFFSET};
use crate::value::{Color, Hue, Label, Percentage, Power, Product, Temperature};

/// Light::State payload size: 4 x u16, reserved(2), power(2), label(32), reserved(8).
pub const STATE_PAYLOAD_SIZE: usize = 52;
/// StateVersion payload size: vendor(4) product(4) version(4).
pub const STATE_VERSION_PAYLOAD_SIZE: usize = 12;

const LABEL_OFFSET: usize = 12;
const POWER_OFFSET: usize = 10;

/// Vendor, product and firmware version reported by a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateVersion {
    pub vendor: u32,
    pub product: Product,
    pub version: u32,
}

impl StateVersion {
    /// Decode a StateVersion payload. Unknown product codes become
    /// [`Product::Unknown`].
    pub fn decode(payload: &[u8]) -> Option<Self> {
        Some(Self {
            vendor: u32_at(payload, 0)?,
            product: Product::from_code(u32_at(payload, 4)?),
            version: u32_at(payload, 8)?,
        })
    }

    /// Device-side encoding, used by emulators and tests.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(STATE_VERSION_PAYLOAD_SIZE);
        dst.put_u32_le(self.vendor);
        dst.put_u32_le(self.product.code());
        dst.put_u32_le(self.version);
    }
}

/// Color, brightness, temperature, power and label of a light.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightState {
    pub color: Color,
    pub brightness: Percentage,
    pub temperature: Temperature,
    pub power: Power,
    pub label: Label,
}

impl LightState {
    /// Decode a Light::State payload.
    pub fn decode(payload: &[u8]) -> Option<Self> {
        if payload.len() < STATE_PAYLOAD_SIZE {
            return None;
        }

        Some(Self {
            color: Color {
                hue: Hue::from_wire(u16_at(payload, 0)?),
                saturation: Percentage::from_wire(u16_at(payload, 2)?),
            },
            brightness: Percentage::from_wire(u16_at(payload, 4)?),
            temperature: Temperature::from_wire(u16_at(payload, 6)?),
            power: Power::from_wire(u16_at(payload, POWER_OFFSET)?),
            label: Label::from_wire(&payload[LABEL_OFFSET..LABEL_OFFSET + Label::MAX_LEN]),
        })
    }

    /// Device-side encoding, used by emulators and tests.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(STATE_PAYLOAD_SIZE);
        dst.put_u16_le(self.color.hue.to_wire());
        dst.put_u16_le(self.color.saturation.to_wire());
        dst.put_u16_le(self.brightness.to_wire());
        dst.put_u16_le(self.temperature.to_wire());
        dst.put_bytes(0, 2);
        dst.put_u16_le(self.power.to_wire());
        let label = self.label.as_bytes();
        dst.put_slice(label);
        dst.put_bytes(0, Label::MAX_LEN - label.len());
        dst.put_bytes(0, 8);
    }
}

/// Typed payload of a decoded response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    /// Acknowledgement; no data.
    Empty,
    StateVersion(StateVersion),
    State(LightState),
}

impl ResponsePayload {
    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ResponsePayload::Empty => "acknowledgement",
            ResponsePayload::StateVersion(_) => "state-version",
            ResponsePayload::State(_) => "light-state",
        }
    }
}

/// Extraction of one payload variant from a [`ResponsePayload`].
pub trait FromResponsePayload: Sized {
    /// Variant name, matching [`ResponsePayload::kind`].
    const KIND: &'static str;

    /// Returns the payload back unchanged if it is a different variant.
    fn from_payload(payload: ResponsePayload) -> Result<Self, ResponsePayload>;
}

/// Marker for an acknowledgement response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgement;

impl FromResponsePayload for Acknowledgement {
    const KIND: &'static str = "acknowledgement";

    fn from_payload(payload: ResponsePayload) -> Result<Self, ResponsePayload> {
        match payload {
            ResponsePayload::Empty => Ok(Acknowledgement),
            other => Err(other),
        }
    }
}

impl FromResponsePayload for StateVersion {
    const KIND: &'static str = "state-version";

    fn from_payload(payload: ResponsePayload) -> Result<Self, ResponsePayload> {
        match payload {
            ResponsePayload::StateVersion(version) => Ok(version),
            other => Err(other),
        }
    }
}

impl FromResponsePayload for LightState {
    const KIND: &'static str = "light-state";

    fn from_payload(payload: ResponsePayload) -> Result<Self, ResponsePayload> {
        match payload {
            ResponsePayload::State(state) => Ok(state),
            other => Err(other),
        }
    }
}

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Echo of the request sequence that triggered this response.
    pub sequence: u8,
    pub payload: ResponsePayload,
    /// Local receive time. Not part of the wire format.
    pub received_at: Instant,
}

/// Decode a datagram, stamping it with the current time.
///
/// Returns `None` for buffers shorter than the header, for commands this
/// client does not understand, and for truncated payloads.
pub fn decode_response(buf: &[u8]) -> Option<Response> {
    decode_response_at(buf, Instant::now())
}

/// Decode a datagram with an explicit receive time.
pub fn decode_response_at(buf: &[u8], received_at: Instant) -> Option<Response> {
    if buf.len() < HEADER_SIZE {
        trace!(len = buf.len(), "ignoring short datagram");
        return None;
    }

    let code = u16_at(buf, COMMAND_OFFSET)?;
    let body = &buf[HEADER_SIZE..];

    let payload = match Command::from_code(code) {
        Some(Command::DeviceAcknowledgement) => ResponsePayload::Empty,
        Some(Command::DeviceStateVersion) => {
            ResponsePayload::StateVersion(StateVersion::decode(body)?)
        }
        Some(Command::LightState) => ResponsePayload::State(LightState::decode(body)?),
        _ => {
            trace!(code, command = command_name(code), "ignoring unrecognized command");
            return None;
        }
    };

    Some(Response {
        sequence: buf[SEQUENCE_OFFSET],
        payload,
        received_at,
    })
}
