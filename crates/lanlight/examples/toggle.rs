//! Flip a light's power with a one-second fade.
//!
//! Usage: cargo run -p lanlight --example toggle -- 192.168.1.40

use std::net::IpAddr;
use std::time::Duration;

use lanlight::{CancellationToken, LightFactory, Power};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ip: IpAddr = std::env::args()
        .nth(1)
        .ok_or("usage: toggle <ip>")?
        .parse()?;

    let cancel = CancellationToken::new();
    let light = LightFactory::new().connect(ip, &cancel).await?;
    let state = light.get_state(&cancel).await?;

    let fade = Duration::from_secs(1);
    match state.power {
        Power::On => light.off(fade, &cancel).await?,
        Power::Off => light.on(fade, &cancel).await?,
    }

    println!("{light} \"{}\" was {}", state.label, state.power);
    Ok(())
}
