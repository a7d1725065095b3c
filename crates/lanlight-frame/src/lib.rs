//! Binary frame codec for the LAN smart-light UDP protocol.
//!
//! Every message is a fixed 36-byte header followed by a command-specific
//! payload:
//! - A 2-byte little-endian total size
//! - Frame flags (protocol number, addressable, tagged) and a 4-byte source
//! - An 8-byte target address, ack/res flags and a 1-byte sequence
//! - A 2-byte command code
//!
//! Encoding is pure. Decoding never fails loudly: anything too short or not
//! understood decodes to `None` and is meant to be dropped.

pub mod command;
pub mod convert;
pub mod error;
pub mod header;
pub mod request;
pub mod response;
pub mod value;

pub use command::{command_name, Command};
pub use error::{FrameError, Result};
pub use header::{decode_header, Header, HEADER_SIZE};
pub use request::{encode_request, Request, RequestPayload, MAX_PAYLOAD};
pub use response::{
    decode_response, decode_response_at, Acknowledgement, FromResponsePayload, LightState,
    Response, ResponsePayload, StateVersion,
};
pub use value::{Color, Hue, Label, Percentage, Power, Product, Temperature};
