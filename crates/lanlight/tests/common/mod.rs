#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use bytes::{BufMut, BytesMut};
use lanlight::frame::convert::{u16_at, u32_at};
use lanlight::frame::{decode_header, Command, Header, StateVersion, HEADER_SIZE};
use lanlight::{Color, Hue, Label, LightState, Percentage, Power, Product, Temperature};
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

/// A request as the fake light saw it.
#[derive(Debug, Clone)]
pub struct Received {
    pub header: Header,
    pub payload: Vec<u8>,
}

impl Received {
    pub fn command(&self) -> Option<Command> {
        Command::from_code(self.header.command)
    }

    /// Transition milliseconds of a SetPower request.
    pub fn power_duration_ms(&self) -> Option<u32> {
        u32_at(&self.payload, 2)
    }

    /// Transition milliseconds of a SetColor request.
    pub fn color_duration_ms(&self) -> Option<u32> {
        u32_at(&self.payload, 9)
    }
}

#[derive(Debug)]
struct Shared {
    state: LightState,
    received: Vec<Received>,
}

/// Loopback light emulator answering version, state and set requests.
pub struct FakeLight {
    pub addr: SocketAddr,
    shared: Arc<Mutex<Shared>>,
    task: JoinHandle<()>,
}

pub fn initial_state() -> LightState {
    LightState {
        color: Color::new(
            Hue::new(120).expect("hue"),
            Percentage::new(1.0).expect("saturation"),
        ),
        brightness: Percentage::new(0.8).expect("brightness"),
        temperature: Temperature::NEUTRAL,
        power: Power::Off,
        label: Label::new("Bench").expect("label"),
    }
}

pub const FIRMWARE: u32 = 0x0002_0050;

impl FakeLight {
    pub async fn spawn(product: Product) -> Self {
        Self::spawn_with(product, true).await
    }

    /// A light that records requests but never answers.
    pub async fn spawn_silent() -> Self {
        Self::spawn_with(Product::Color1000, false).await
    }

    async fn spawn_with(product: Product, answer: bool) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .expect("fake light should bind");
        let addr = socket.local_addr().expect("fake light should have an address");
        let shared = Arc::new(Mutex::new(Shared {
            state: initial_state(),
            received: Vec::new(),
        }));

        let task = tokio::spawn(serve(socket, Arc::clone(&shared), product, answer));
        Self { addr, shared, task }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn state(&self) -> LightState {
        self.shared.lock().expect("lock").state.clone()
    }

    pub fn received(&self) -> Vec<Received> {
        self.shared.lock().expect("lock").received.clone()
    }

    pub fn received_commands(&self) -> Vec<Command> {
        self.received()
            .iter()
            .filter_map(Received::command)
            .collect()
    }

    pub fn last(&self, command: Command) -> Option<Received> {
        self.received()
            .into_iter()
            .rev()
            .find(|r| r.command() == Some(command))
    }
}

impl Drop for FakeLight {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(socket: UdpSocket, shared: Arc<Mutex<Shared>>, product: Product, answer: bool) {
    let mut buf = [0u8; 1024];
    loop {
        let Ok((len, from)) = socket.recv_from(&mut buf).await else {
            return;
        };
        let Some(header) = decode_header(&buf[..len]) else {
            continue;
        };
        let received = Received {
            header,
            payload: buf[HEADER_SIZE..len].to_vec(),
        };

        let reply = {
            let mut shared = shared.lock().expect("lock");
            shared.received.push(received.clone());
            apply(&mut shared.state, &received, product)
        };

        if !answer {
            continue;
        }
        let reply = match reply {
            Some(reply) => Some(reply),
            None if header.ack_required => {
                Some(frame(Command::DeviceAcknowledgement, header.sequence, &[]))
            }
            None => None,
        };
        if let Some(reply) = reply {
            let _ = socket.send_to(&reply, from).await;
        }
    }
}

/// Apply a request to the emulated state; returns a state reply if one is due.
fn apply(state: &mut LightState, request: &Received, product: Product) -> Option<BytesMut> {
    let sequence = request.header.sequence;
    let payload = &request.payload;

    match request.command()? {
        Command::DeviceGetVersion => {
            let mut body = BytesMut::new();
            StateVersion {
                vendor: 1,
                product,
                version: FIRMWARE,
            }
            .encode(&mut body);
            Some(frame(Command::DeviceStateVersion, sequence, &body))
        }
        Command::LightGet => {
            let mut body = BytesMut::new();
            state.encode(&mut body);
            Some(frame(Command::LightState, sequence, &body))
        }
        Command::DeviceSetPower => {
            state.power = Power::from_wire(u16_at(payload, 0)?);
            None
        }
        Command::DeviceSetLabel => {
            state.label = Label::from_wire(payload);
            None
        }
        Command::LightSetColor => {
            state.color = Color::new(
                Hue::from_wire(u16_at(payload, 1)?),
                Percentage::from_wire(u16_at(payload, 3)?),
            );
            state.brightness = Percentage::from_wire(u16_at(payload, 5)?);
            state.temperature = Temperature::from_wire(u16_at(payload, 7)?);
            None
        }
        _ => None,
    }
}

pub fn frame(command: Command, sequence: u8, payload: &[u8]) -> BytesMut {
    let mut buf = BytesMut::new();
    Header {
        size: (HEADER_SIZE + payload.len()) as u16,
        tagged: false,
        source: 1,
        target: 0x0000_D073_D512_3456,
        res_required: false,
        ack_required: false,
        sequence,
        command: command.code(),
    }
    .encode(&mut buf);
    buf.put_slice(payload);
    buf
}
