use lanlight::LightState;
use serde::Serialize;

use crate::cmd::session::{block_on, connect};
use crate::cmd::DeviceArgs;
use crate::exit::{light_error, CliResult, SUCCESS};
use crate::output::{print_report, OutputFormat, Report};

#[derive(Serialize)]
struct StateOutput {
    address: String,
    label: String,
    power: String,
    hue: u16,
    saturation: f64,
    brightness: f64,
    kelvin: u16,
}

impl StateOutput {
    fn new(address: String, state: &LightState) -> Self {
        Self {
            address,
            label: state.label.to_string(),
            power: state.power.to_string(),
            hue: state.color.hue.degrees(),
            saturation: state.color.saturation.value(),
            brightness: state.brightness.value(),
            kelvin: state.temperature.kelvin(),
        }
    }
}

impl Report for StateOutput {
    fn title(&self) -> &'static str {
        "Light State"
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Address", self.address.clone()),
            ("Label", self.label.clone()),
            ("Power", self.power.clone()),
            ("Hue", self.hue.to_string()),
            ("Saturation", format!("{:.1}%", self.saturation * 100.0)),
            ("Brightness", format!("{:.1}%", self.brightness * 100.0)),
            ("Temperature", format!("{}K", self.kelvin)),
        ]
    }
}

pub fn run(args: DeviceArgs, format: OutputFormat) -> CliResult<i32> {
    let out = block_on(|cancel| async move {
        let light = connect(&args, &cancel).await?;
        let state = light
            .get_state(&cancel)
            .await
            .map_err(|err| light_error("get state failed", err))?;
        Ok(StateOutput::new(light.address().to_string(), &state))
    })?;

    print_report(&out, format);
    Ok(SUCCESS)
}

#[cfg(test)]
mod tests {
    use lanlight::{Color, Hue, Label, Percentage, Power, Temperature};

    use super::*;

    #[test]
    fn output_carries_plain_values() {
        let state = LightState {
            color: Color::new(Hue::new(200).unwrap(), Percentage::new(0.5).unwrap()),
            brightness: Percentage::new(1.0).unwrap(),
            temperature: Temperature::COOL,
            power: Power::On,
            label: Label::new("Desk").unwrap(),
        };
        let out = StateOutput::new("10.0.0.9:56700".to_string(), &state);
        assert_eq!(out.hue, 200);
        assert_eq!(out.kelvin, 4000);
        assert_eq!(out.power, "on");
        assert_eq!(out.label, "Desk");

        let rows = out.rows();
        assert!(rows.contains(&("Saturation", "50.0%".to_string())));
        assert!(rows.contains(&("Temperature", "4000K".to_string())));
    }
}
