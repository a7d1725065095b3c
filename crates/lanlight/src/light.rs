use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use lanlight_frame::{
    Color, Label, LightState, Percentage, Power, Product, Request, StateVersion, Temperature,
};
use lanlight_session::{CancellationToken, Communicator, RequestFactory};
use tracing::debug;

use crate::error::{LightError, Result};

/// One light on the local network.
///
/// Owns its session; dropping the light closes the socket.
#[derive(Debug)]
pub struct Light {
    communicator: Communicator,
    requests: RequestFactory,
    version: StateVersion,
}

impl Light {
    /// Wrap an open session and the version the device reported.
    pub fn new(
        communicator: Communicator,
        requests: RequestFactory,
        version: StateVersion,
    ) -> Self {
        Self {
            communicator,
            requests,
            version,
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.communicator.remote()
    }

    pub fn product(&self) -> Product {
        self.version.product
    }

    pub fn vendor(&self) -> u32 {
        self.version.vendor
    }

    /// Firmware version as reported by the device.
    pub fn version(&self) -> u32 {
        self.version.version
    }

    pub async fn get_state(&self, cancel: &CancellationToken) -> Result<LightState> {
        let state: LightState = self
            .communicator
            .send_and_receive(&self.requests.get_state(), cancel)
            .await?;
        Ok(state)
    }

    pub async fn set_label(&self, label: Label, cancel: &CancellationToken) -> Result<()> {
        self.send(self.requests.set_label(label), cancel).await
    }

    pub async fn set_power(
        &self,
        power: Power,
        duration: Duration,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.send(self.requests.set_power(power, duration), cancel).await
    }

    pub async fn on(&self, duration: Duration, cancel: &CancellationToken) -> Result<()> {
        self.set_power(Power::On, duration, cancel).await
    }

    pub async fn off(&self, duration: Duration, cancel: &CancellationToken) -> Result<()> {
        self.set_power(Power::Off, duration, cancel).await
    }

    /// Change brightness, keeping the current color and temperature.
    pub async fn set_brightness(
        &self,
        brightness: Percentage,
        duration: Duration,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let state = self.get_state(cancel).await?;
        self.set_properties(state.color, brightness, state.temperature, duration, cancel)
            .await
    }

    /// Switch to white at `temperature`, keeping the current brightness.
    pub async fn set_temperature(
        &self,
        temperature: Temperature,
        duration: Duration,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let state = self.get_state(cancel).await?;
        self.set_properties(Color::WHITE, state.brightness, temperature, duration, cancel)
            .await
    }

    /// Change hue and saturation, keeping brightness and temperature.
    ///
    /// White-only products fail with [`LightError::ColorUnsupported`]
    /// before anything is sent.
    pub async fn set_color(
        &self,
        color: Color,
        duration: Duration,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let product = self.product();
        if !product.supports_color() {
            return Err(LightError::ColorUnsupported(product));
        }

        let state = self.get_state(cancel).await?;
        self.set_properties(color, state.brightness, state.temperature, duration, cancel)
            .await
    }

    async fn set_properties(
        &self,
        color: Color,
        brightness: Percentage,
        temperature: Temperature,
        duration: Duration,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let request = self
            .requests
            .set_color(color, brightness, temperature, duration);
        self.send(request, cancel).await
    }

    async fn send(&self, request: Request, cancel: &CancellationToken) -> Result<()> {
        debug!(
            address = %self.address(),
            command = request.command.name(),
            "sending"
        );
        self.communicator.send(&request, cancel).await?;
        Ok(())
    }
}

impl fmt::Display for Light {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[address: {}; product: {:?}; version: {}]",
            self.address(),
            self.product(),
            self.version()
        )
    }
}
