use std::net::{IpAddr, SocketAddr};

use lanlight_frame::StateVersion;
use lanlight_session::{CancellationToken, Communicator, CommunicatorConfig, RequestFactory};
use tracing::info;

use crate::error::Result;
use crate::light::Light;

/// UDP port lights listen on.
pub const DEFAULT_PORT: u16 = 56700;

/// Opens device sessions and probes what is on the other end.
#[derive(Debug, Clone)]
pub struct LightFactory {
    pub port: u16,
    pub config: CommunicatorConfig,
}

impl Default for LightFactory {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            config: CommunicatorConfig::default(),
        }
    }
}

impl LightFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_config(mut self, config: CommunicatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Open a session with the light at `ip` and ask for its version.
    ///
    /// The session is closed again if the probe fails.
    pub async fn connect(&self, ip: IpAddr, cancel: &CancellationToken) -> Result<Light> {
        let remote = SocketAddr::new(ip, self.port);
        let communicator = Communicator::connect_with_config(remote, self.config.clone()).await?;
        let requests = RequestFactory::new();

        let version: StateVersion = communicator
            .send_and_receive(&requests.get_version(), cancel)
            .await?;
        info!(
            %remote,
            product = ?version.product,
            version = version.version,
            "light connected"
        );

        Ok(Light::new(communicator, requests, version))
    }
}
