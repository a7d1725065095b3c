use lanlight::Power;

use crate::cmd::session::{block_on, connect, transition};
use crate::cmd::{PowerArgs, PowerState};
use crate::exit::{light_error, CliResult, SUCCESS};
use crate::output::{print_report, ChangeReport, OutputFormat};

impl From<PowerState> for Power {
    fn from(state: PowerState) -> Self {
        match state {
            PowerState::On => Power::On,
            PowerState::Off => Power::Off,
        }
    }
}

pub fn run(args: PowerArgs, format: OutputFormat) -> CliResult<i32> {
    let duration = transition(&args.transition)?;
    let power = Power::from(args.state);

    let out = block_on(|cancel| async move {
        let light = connect(&args.device, &cancel).await?;
        light
            .set_power(power, duration, &cancel)
            .await
            .map_err(|err| light_error("set power failed", err))?;
        Ok(ChangeReport {
            address: light.address().to_string(),
            change: "power",
            value: power.to_string(),
            duration_ms: duration.as_millis(),
            acknowledged: true,
        })
    })?;

    print_report(&out, format);
    Ok(SUCCESS)
}
