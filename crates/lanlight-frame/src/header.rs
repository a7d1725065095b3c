use bytes::{BufMut, BytesMut};

use crate::convert::{u16_at, u32_at, u64_at};

/// Frame + frame address + protocol header = 36 bytes.
pub const HEADER_SIZE: usize = 36;

/// Protocol number carried in the low 12 bits of the frame flags.
pub const PROTOCOL_NUMBER: u16 = 0x0400;
/// Frame flag: message includes a target address. Always set.
pub const ADDRESSABLE_FLAG: u16 = 0x1000;
/// Frame flag: target is all devices rather than one.
pub const TAGGED_FLAG: u16 = 0x2000;

/// Address flag: device should reply with a state message.
pub const RES_REQUIRED_FLAG: u8 = 0x01;
/// Address flag: device should reply with an acknowledgement.
pub const ACK_REQUIRED_FLAG: u8 = 0x02;

pub const FLAGS_OFFSET: usize = 2;
pub const SOURCE_OFFSET: usize = 4;
pub const TARGET_OFFSET: usize = 8;
pub const ADDRESS_FLAGS_OFFSET: usize = 22;
pub const SEQUENCE_OFFSET: usize = 23;
pub const COMMAND_OFFSET: usize = 32;

/// Decoded view of the fixed 36-byte header.
///
/// Wire format (all integers little-endian):
/// ```text
/// ┌──────┬───────┬────────┬────────┬──────────┬───────┬─────┬──────────┬─────────┬──────────┐
/// │ size │ flags │ source │ target │ reserved │ addr  │ seq │ reserved │ command │ reserved │
/// │ (2B) │ (2B)  │ (4B)   │ (8B)   │ (6B)     │ (1B)  │(1B) │ (8B)     │ (2B)    │ (2B)     │
/// └──────┴───────┴────────┴────────┴──────────┴───────┴─────┴──────────┴─────────┴──────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Total message size, header included.
    pub size: u16,
    pub tagged: bool,
    pub source: u32,
    pub target: u64,
    pub res_required: bool,
    pub ack_required: bool,
    pub sequence: u8,
    pub command: u16,
}

impl Header {
    /// Frame flags: protocol number and addressable always, tagged on demand.
    pub fn frame_flags(&self) -> u16 {
        let mut flags = PROTOCOL_NUMBER | ADDRESSABLE_FLAG;
        if self.tagged {
            flags |= TAGGED_FLAG;
        }
        flags
    }

    pub fn address_flags(&self) -> u8 {
        let mut flags = 0;
        if self.res_required {
            flags |= RES_REQUIRED_FLAG;
        }
        if self.ack_required {
            flags |= ACK_REQUIRED_FLAG;
        }
        flags
    }

    /// Append the 36 header bytes to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(HEADER_SIZE);
        dst.put_u16_le(self.size);
        dst.put_u16_le(self.frame_flags());
        dst.put_u32_le(self.source);
        dst.put_u64_le(self.target);
        dst.put_bytes(0, 6);
        dst.put_u8(self.address_flags());
        dst.put_u8(self.sequence);
        dst.put_bytes(0, 8);
        dst.put_u16_le(self.command);
        dst.put_bytes(0, 2);
    }
}

/// Parse the header fields of a frame. Returns `None` if `buf` is shorter
/// than [`HEADER_SIZE`].
pub fn decode_header(buf: &[u8]) -> Option<Header> {
    if buf.len() < HEADER_SIZE {
        return None;
    }

    let flags = u16_at(buf, FLAGS_OFFSET)?;
    let address_flags = buf[ADDRESS_FLAGS_OFFSET];

    Some(Header {
        size: u16_at(buf, 0)?,
        tagged: flags & TAGGED_FLAG != 0,
        source: u32_at(buf, SOURCE_OFFSET)?,
        target: u64_at(buf, TARGET_OFFSET)?,
        res_required: address_flags & RES_REQUIRED_FLAG != 0,
        ack_required: address_flags & ACK_REQUIRED_FLAG != 0,
        sequence: buf[SEQUENCE_OFFSET],
        command: u16_at(buf, COMMAND_OFFSET)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Header {
        Header {
            size: HEADER_SIZE as u16,
            tagged: false,
            source: 0xDEAD_BEEF,
            target: 0x0000_D073_D500_1337,
            res_required: true,
            ack_required: false,
            sequence: 42,
            command: 101,
        }
    }

    #[test]
    fn encodes_exactly_header_size() {
        let mut buf = BytesMut::new();
        sample().encode(&mut buf);
        assert_eq!(buf.len(), HEADER_SIZE);
    }

    #[test]
    fn encode_decode_roundtrip() {
        let header = sample();
        let mut buf = BytesMut::new();
        header.encode(&mut buf);
        assert_eq!(decode_header(&buf), Some(header));
    }

    #[test]
    fn field_offsets() {
        let mut buf = BytesMut::new();
        sample().encode(&mut buf);

        assert_eq!(&buf[0..2], &[36, 0]);
        assert_eq!(&buf[2..4], &(PROTOCOL_NUMBER | ADDRESSABLE_FLAG).to_le_bytes());
        assert_eq!(&buf[4..8], &0xDEAD_BEEFu32.to_le_bytes());
        assert_eq!(&buf[16..22], &[0u8; 6]);
        assert_eq!(buf[ADDRESS_FLAGS_OFFSET], RES_REQUIRED_FLAG);
        assert_eq!(buf[SEQUENCE_OFFSET], 42);
        assert_eq!(&buf[24..32], &[0u8; 8]);
        assert_eq!(&buf[32..34], &[101, 0]);
        assert_eq!(&buf[34..36], &[0, 0]);
    }

    #[test]
    fn both_address_flags() {
        let header = Header {
            res_required: true,
            ack_required: true,
            ..sample()
        };
        assert_eq!(header.address_flags(), 0x03);
    }

    #[test]
    fn tagged_sets_frame_flag() {
        let header = Header {
            tagged: true,
            ..sample()
        };
        assert_eq!(header.frame_flags(), 0x3400);
        assert_eq!(sample().frame_flags(), 0x1400);
    }

    #[test]
    fn short_buffer_has_no_header() {
        assert_eq!(decode_header(&[0u8; HEADER_SIZE - 1]), None);
    }
}
