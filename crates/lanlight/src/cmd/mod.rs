use std::net::IpAddr;

use clap::{Args, Subcommand, ValueEnum};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod color;
pub mod info;
pub mod label;
pub mod power;
pub mod session;
pub mod state;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Probe a light and print its product and firmware.
    Info(DeviceArgs),
    /// Print a light's current color, brightness, power and label.
    State(DeviceArgs),
    /// Switch a light on or off.
    Power(PowerArgs),
    /// Rename a light.
    Label(LabelArgs),
    /// Set hue and saturation, keeping brightness and temperature.
    Color(ColorArgs),
    /// Set brightness, keeping color and temperature.
    Brightness(BrightnessArgs),
    /// Switch to white at a color temperature, keeping brightness.
    Temperature(TemperatureArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Info(args) => info::run(args, format),
        Command::State(args) => state::run(args, format),
        Command::Power(args) => power::run(args, format),
        Command::Label(args) => label::run(args, format),
        Command::Color(args) => color::run_color(args, format),
        Command::Brightness(args) => color::run_brightness(args, format),
        Command::Temperature(args) => color::run_temperature(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    /// Light IP address.
    pub ip: IpAddr,
    /// Light UDP port.
    #[arg(long, default_value_t = lanlight::DEFAULT_PORT)]
    pub port: u16,
    /// Response timeout per request (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s")]
    pub timeout: String,
}

#[derive(Args, Debug, Clone)]
pub struct TransitionArgs {
    /// Transition time (e.g. 2s, 750ms).
    #[arg(long, default_value = "0ms")]
    pub duration: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PowerState {
    On,
    Off,
}

#[derive(Args, Debug)]
pub struct PowerArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
    /// Target power state.
    #[arg(value_enum)]
    pub state: PowerState,
    #[command(flatten)]
    pub transition: TransitionArgs,
}

#[derive(Args, Debug)]
pub struct LabelArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
    /// New label, at most 32 bytes of UTF-8.
    pub label: String,
}

#[derive(Args, Debug)]
pub struct ColorArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
    /// Hue in degrees (0-360).
    pub hue: u16,
    /// Saturation (0.0-1.0).
    pub saturation: f64,
    #[command(flatten)]
    pub transition: TransitionArgs,
}

#[derive(Args, Debug)]
pub struct BrightnessArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
    /// Brightness (0.0-1.0).
    pub brightness: f64,
    #[command(flatten)]
    pub transition: TransitionArgs,
}

#[derive(Args, Debug)]
pub struct TemperatureArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
    /// Color temperature in kelvin (2500-9000).
    pub kelvin: u16,
    #[command(flatten)]
    pub transition: TransitionArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
