use std::time::Duration;

use lanlight::frame::FrameError;
use lanlight::{Color, Hue, Light, Percentage, Temperature};

use crate::cmd::session::{block_on, connect, transition};
use crate::cmd::{BrightnessArgs, ColorArgs, DeviceArgs, TemperatureArgs};
use crate::exit::{light_error, CliError, CliResult, SUCCESS};
use crate::output::{print_report, ChangeReport, OutputFormat};

/// One set-color style change, already validated.
enum Change {
    Color(Color),
    Brightness(Percentage),
    Temperature(Temperature),
}

impl Change {
    fn name(&self) -> &'static str {
        match self {
            Change::Color(_) => "color",
            Change::Brightness(_) => "brightness",
            Change::Temperature(_) => "temperature",
        }
    }

    fn value(&self) -> String {
        match self {
            Change::Color(color) => color.to_string(),
            Change::Brightness(brightness) => brightness.to_string(),
            Change::Temperature(temperature) => temperature.to_string(),
        }
    }

    async fn apply(
        &self,
        light: &Light,
        duration: Duration,
        cancel: &lanlight::CancellationToken,
    ) -> lanlight::Result<()> {
        match self {
            Change::Color(color) => light.set_color(*color, duration, cancel).await,
            Change::Brightness(brightness) => {
                light.set_brightness(*brightness, duration, cancel).await
            }
            Change::Temperature(temperature) => {
                light.set_temperature(*temperature, duration, cancel).await
            }
        }
    }
}

pub fn run_color(args: ColorArgs, format: OutputFormat) -> CliResult<i32> {
    let color = Color::new(
        Hue::new(args.hue).map_err(invalid("hue"))?,
        Percentage::new(args.saturation).map_err(invalid("saturation"))?,
    );
    let duration = transition(&args.transition)?;
    apply(args.device, Change::Color(color), duration, format)
}

pub fn run_brightness(args: BrightnessArgs, format: OutputFormat) -> CliResult<i32> {
    let brightness = Percentage::new(args.brightness).map_err(invalid("brightness"))?;
    let duration = transition(&args.transition)?;
    apply(args.device, Change::Brightness(brightness), duration, format)
}

pub fn run_temperature(args: TemperatureArgs, format: OutputFormat) -> CliResult<i32> {
    let temperature = Temperature::new(args.kelvin).map_err(invalid("temperature"))?;
    let duration = transition(&args.transition)?;
    apply(args.device, Change::Temperature(temperature), duration, format)
}

fn apply(
    device: DeviceArgs,
    change: Change,
    duration: Duration,
    format: OutputFormat,
) -> CliResult<i32> {
    let out = block_on(|cancel| async move {
        let light = connect(&device, &cancel).await?;
        change
            .apply(&light, duration, &cancel)
            .await
            .map_err(|err| light_error(&format!("set {} failed", change.name()), err))?;
        Ok(ChangeReport {
            address: light.address().to_string(),
            change: change.name(),
            value: change.value(),
            duration_ms: duration.as_millis(),
            acknowledged: true,
        })
    })?;

    print_report(&out, format);
    Ok(SUCCESS)
}

fn invalid(what: &'static str) -> impl Fn(FrameError) -> CliError {
    move |err| CliError::usage(format!("invalid {what}: {err}"))
}
