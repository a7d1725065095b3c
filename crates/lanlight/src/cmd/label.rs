use lanlight::Label;

use crate::cmd::session::{block_on, connect};
use crate::cmd::LabelArgs;
use crate::exit::{light_error, CliError, CliResult, SUCCESS};
use crate::output::{print_report, ChangeReport, OutputFormat};

pub fn run(args: LabelArgs, format: OutputFormat) -> CliResult<i32> {
    let label = Label::new(args.label.as_str())
        .map_err(|err| CliError::usage(format!("invalid label: {err}")))?;

    let out = block_on(|cancel| async move {
        let light = connect(&args.device, &cancel).await?;
        light
            .set_label(label.clone(), &cancel)
            .await
            .map_err(|err| light_error("set label failed", err))?;
        Ok(ChangeReport {
            address: light.address().to_string(),
            change: "label",
            value: label.to_string(),
            duration_ms: 0,
            acknowledged: true,
        })
    })?;

    print_report(&out, format);
    Ok(SUCCESS)
}
