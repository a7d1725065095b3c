use std::time::Duration;

use lanlight_frame::{
    Color, Command, Label, Percentage, Power, Request, RequestPayload, Temperature,
};

/// Source identifier used when none is configured.
///
/// A non-zero source makes devices reply by unicast to the sending socket.
pub const DEFAULT_SOURCE: u32 = 1;

/// Builds requests with a fresh sequence number each.
///
/// Get requests ask for a state response; set requests ask for an
/// acknowledgement.
#[derive(Debug)]
pub struct RequestFactory {
    source: u32,
    target: u64,
    sequencer: crate::Sequencer,
}

impl Default for RequestFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestFactory {
    /// Default source, target zero (all devices reached through the socket).
    pub fn new() -> Self {
        Self {
            source: DEFAULT_SOURCE,
            target: 0,
            sequencer: crate::Sequencer::new(),
        }
    }

    /// Override the source identifier.
    pub fn with_source(mut self, source: u32) -> Self {
        self.source = source;
        self
    }

    /// Address a single device by its 8-byte target (MAC, zero-filled).
    pub fn with_target(mut self, target: u64) -> Self {
        self.target = target;
        self
    }

    /// Override the sequence allocator.
    pub fn with_sequencer(mut self, sequencer: crate::Sequencer) -> Self {
        self.sequencer = sequencer;
        self
    }

    pub fn source(&self) -> u32 {
        self.source
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn get_version(&self) -> Request {
        self.build(Command::DeviceGetVersion, false, true, RequestPayload::Empty)
    }

    pub fn get_state(&self) -> Request {
        self.build(Command::LightGet, false, true, RequestPayload::Empty)
    }

    pub fn set_label(&self, label: Label) -> Request {
        self.build(
            Command::DeviceSetLabel,
            true,
            false,
            RequestPayload::SetLabel(label),
        )
    }

    pub fn set_power(&self, power: Power, duration: Duration) -> Request {
        self.build(
            Command::DeviceSetPower,
            true,
            false,
            RequestPayload::SetPower { power, duration },
        )
    }

    pub fn set_color(
        &self,
        color: Color,
        brightness: Percentage,
        temperature: Temperature,
        duration: Duration,
    ) -> Request {
        self.build(
            Command::LightSetColor,
            true,
            false,
            RequestPayload::SetColor {
                color,
                brightness,
                temperature,
                duration,
            },
        )
    }

    fn build(
        &self,
        command: Command,
        ack_required: bool,
        res_required: bool,
        payload: RequestPayload,
    ) -> Request {
        Request {
            command,
            ack_required,
            res_required,
            sequence: self.sequencer.next(),
            source: self.source,
            target: self.target,
            payload,
        }
    }
}
