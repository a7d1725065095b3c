//! Request/response correlation for the LAN smart-light protocol.
//!
//! A [`Communicator`] owns one UDP socket per device. Requests are tagged
//! with an 8-bit sequence number from a [`Sequencer`]; a background reader
//! matches each inbound response to the caller waiting on that sequence,
//! parking responses nobody is waiting for yet. Every wait is bounded by the
//! response expiry and by a caller-supplied `CancellationToken`.

pub mod communicator;
pub mod error;
pub mod factory;
pub mod mailbox;
pub mod sequence;

pub use communicator::{
    Communicator, CommunicatorConfig, DEFAULT_RECV_BUFFER_SIZE, DEFAULT_RESPONSE_EXPIRY,
};
pub use error::{Result, SessionError};
pub use factory::{RequestFactory, DEFAULT_SOURCE};
pub use mailbox::{Delivery, Mailbox, Registration, Waiter};
pub use sequence::Sequencer;
pub use tokio_util::sync::CancellationToken;
