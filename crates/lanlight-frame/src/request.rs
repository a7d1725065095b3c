use std::time::Duration;

use bytes::{BufMut, Bytes, BytesMut};

use crate::command::Command;
use crate::convert::duration_to_millis;
use crate::error::{FrameError, Result};
use crate::header::{Header, HEADER_SIZE};
use crate::value::{Color, Label, Percentage, Power, Temperature};

/// Largest payload that still fits the 16-bit size field.
pub const MAX_PAYLOAD: usize = u16::MAX as usize - HEADER_SIZE;

/// Payload of an outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPayload {
    /// Get requests carry no payload.
    Empty,
    /// Light::SetColor: reserved(1) hue(2) saturation(2) brightness(2) kelvin(2) duration(4).
    SetColor {
        color: Color,
        brightness: Percentage,
        temperature: Temperature,
        duration: Duration,
    },
    /// SetPower: level(2) duration(4).
    SetPower { power: Power, duration: Duration },
    /// SetLabel: raw label bytes; the device pads to its field size.
    SetLabel(Label),
}

impl RequestPayload {
    /// Append the payload bytes to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        match self {
            RequestPayload::Empty => {}
            RequestPayload::SetColor {
                color,
                brightness,
                temperature,
                duration,
            } => {
                dst.reserve(13);
                dst.put_u8(0);
                dst.put_u16_le(color.hue.to_wire());
                dst.put_u16_le(color.saturation.to_wire());
                dst.put_u16_le(brightness.to_wire());
                dst.put_u16_le(temperature.to_wire());
                dst.put_u32_le(duration_to_millis(*duration));
            }
            RequestPayload::SetPower { power, duration } => {
                dst.reserve(6);
                dst.put_u16_le(power.to_wire());
                dst.put_u32_le(duration_to_millis(*duration));
            }
            RequestPayload::SetLabel(label) => dst.put_slice(label.as_bytes()),
        }
    }

    /// Encoded payload length in bytes.
    pub fn wire_len(&self) -> usize {
        match self {
            RequestPayload::Empty => 0,
            RequestPayload::SetColor { .. } => 13,
            RequestPayload::SetPower { .. } => 6,
            RequestPayload::SetLabel(label) => label.as_bytes().len(),
        }
    }
}

/// An outbound message. Built once per call and encoded once.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub command: Command,
    pub ack_required: bool,
    pub res_required: bool,
    pub sequence: u8,
    pub source: u32,
    /// Device address; zero addresses every device on the network.
    pub target: u64,
    pub payload: RequestPayload,
}

impl Request {
    /// The header this request encodes to.
    pub fn header(&self) -> Result<Header> {
        let payload_len = self.payload.wire_len();
        if payload_len > MAX_PAYLOAD {
            return Err(FrameError::PayloadTooLarge {
                size: payload_len,
                max: MAX_PAYLOAD,
            });
        }

        Ok(Header {
            size: (HEADER_SIZE + payload_len) as u16,
            tagged: self.target == 0,
            source: self.source,
            target: self.target,
            res_required: self.res_required,
            ack_required: self.ack_required,
            sequence: self.sequence,
            command: self.command.code(),
        })
    }

    /// The total wire size of this request (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.wire_len()
    }

    /// Encode into a freshly allocated buffer.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(self.wire_size());
        encode_request(self, &mut buf)?;
        Ok(buf.freeze())
    }
}

/// Encode a request into the wire format.
pub fn encode_request(request: &Request, dst: &mut BytesMut) -> Result<()> {
    let header = request.header()?;
    dst.reserve(usize::from(header.size));
    header.encode(dst);
    request.payload.encode(dst);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{u16_at, u32_at};
    use crate::header::{decode_header, TAGGED_FLAG};
    use crate::value::Hue;

    fn request(target: u64, payload: RequestPayload) -> Request {
        Request {
            command: Command::DeviceSetPower,
            ack_required: true,
            res_required: false,
            sequence: 7,
            source: 1,
            target,
            payload,
        }
    }

    fn set_power_off() -> RequestPayload {
        RequestPayload::SetPower {
            power: Power::Off,
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn empty_payload_is_header_only() {
        let bytes = request(0, RequestPayload::Empty).to_bytes().unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(u16_at(&bytes, 0), Some(HEADER_SIZE as u16));
    }

    #[test]
    fn set_power_frame_layout() {
        let req = Request {
            source: 0,
            ..request(u64::MAX, set_power_off())
        };
        let bytes = req.to_bytes().unwrap();

        assert_eq!(bytes.len(), 42);
        assert_eq!(u16_at(&bytes, 0), Some(42));
        let flags = u16_at(&bytes, 2).unwrap();
        assert_eq!(flags & TAGGED_FLAG, 0);
        assert_eq!(u16_at(&bytes, HEADER_SIZE), Some(0x0000));
        assert_eq!(u32_at(&bytes, HEADER_SIZE + 2), Some(0));
    }

    #[test]
    fn header_fields_survive_encoding() {
        for target in [0u64, 1, 0x0000_D073_D500_1337, u64::MAX] {
            for (ack, res) in [(false, false), (true, false), (false, true), (true, true)] {
                let req = Request {
                    ack_required: ack,
                    res_required: res,
                    source: u32::MAX,
                    sequence: 255,
                    ..request(target, set_power_off())
                };
                let bytes = req.to_bytes().unwrap();
                let header = decode_header(&bytes).unwrap();

                assert_eq!(header.size as usize, bytes.len());
                assert_eq!(header.tagged, target == 0);
                assert_eq!(header.source, u32::MAX);
                assert_eq!(header.target, target);
                assert_eq!(header.ack_required, ack);
                assert_eq!(header.res_required, res);
                assert_eq!(header.sequence, 255);
                assert_eq!(header.command, Command::DeviceSetPower.code());
            }
        }
    }

    #[test]
    fn tagged_only_for_zero_target() {
        for bit in 0..64 {
            for target in [1u64 << bit, u64::MAX >> bit] {
                let header = request(target, RequestPayload::Empty).header().unwrap();
                assert!(!header.tagged, "target {target:#x} must not be tagged");
            }
        }
        assert!(request(0, RequestPayload::Empty).header().unwrap().tagged);
    }

    #[test]
    fn set_color_payload_layout() {
        let payload = RequestPayload::SetColor {
            color: Color::new(Hue::new(180).unwrap(), Percentage::new(1.0).unwrap()),
            brightness: Percentage::new(0.5).unwrap(),
            temperature: Temperature::NEUTRAL,
            duration: Duration::from_millis(1500),
        };
        let mut buf = BytesMut::new();
        payload.encode(&mut buf);

        assert_eq!(buf.len(), payload.wire_len());
        assert_eq!(buf[0], 0);
        assert_eq!(u16_at(&buf, 1), Some(32768));
        assert_eq!(u16_at(&buf, 3), Some(u16::MAX));
        assert_eq!(u16_at(&buf, 5), Some(32768));
        assert_eq!(u16_at(&buf, 7), Some(3500));
        assert_eq!(u32_at(&buf, 9), Some(1500));
    }

    #[test]
    fn set_power_on_payload() {
        let payload = RequestPayload::SetPower {
            power: Power::On,
            duration: Duration::from_secs(2),
        };
        let mut buf = BytesMut::new();
        payload.encode(&mut buf);
        assert_eq!(buf.as_ref(), &[0xFF, 0xFF, 0xD0, 0x07, 0x00, 0x00]);
    }

    #[test]
    fn set_label_is_unpadded() {
        let payload = RequestPayload::SetLabel(Label::new("Desk").unwrap());
        let bytes = request(1, payload).to_bytes().unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE + 4);
        assert_eq!(&bytes[HEADER_SIZE..], b"Desk");
    }
}
