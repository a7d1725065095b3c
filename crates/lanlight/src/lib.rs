//! Async client for LAN smart lights speaking the vendor UDP protocol.
//!
//! # Crate Structure
//!
//! - [`frame`]: Binary frame codec, command table and validated value types
//! - [`session`]: Per-device UDP session with request/response correlation
//! - [`Light`]: Device facade over one session
//! - [`LightFactory`]: Opens a session and probes the device's product
//!
//! ```no_run
//! use std::net::Ipv4Addr;
//! use std::time::Duration;
//!
//! use lanlight::{CancellationToken, LightFactory};
//!
//! # async fn demo() -> lanlight::Result<()> {
//! let cancel = CancellationToken::new();
//! let light = LightFactory::new()
//!     .connect(Ipv4Addr::new(192, 168, 1, 40).into(), &cancel)
//!     .await?;
//! light.on(Duration::from_millis(500), &cancel).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod factory;
pub mod light;

/// Re-export frame types.
pub mod frame {
    pub use lanlight_frame::*;
}

/// Re-export session types.
pub mod session {
    pub use lanlight_session::*;
}

pub use error::{LightError, Result};
pub use factory::{LightFactory, DEFAULT_PORT};
pub use lanlight_frame::{Color, Hue, Label, LightState, Percentage, Power, Product, Temperature};
pub use lanlight_session::CancellationToken;
pub use light::Light;
