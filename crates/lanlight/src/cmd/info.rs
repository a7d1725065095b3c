use serde::Serialize;

use crate::cmd::session::{block_on, connect};
use crate::cmd::DeviceArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_report, OutputFormat, Report};

#[derive(Serialize)]
struct InfoOutput {
    address: String,
    product: String,
    product_code: u32,
    supports_color: bool,
    vendor: u32,
    version: u32,
}

impl Report for InfoOutput {
    fn title(&self) -> &'static str {
        "Light Info"
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Address", self.address.clone()),
            ("Product", format!("{} ({})", self.product, self.product_code)),
            ("Color", if self.supports_color { "yes" } else { "white only" }.to_string()),
            ("Vendor", self.vendor.to_string()),
            ("Firmware", format_firmware(self.version)),
        ]
    }
}

pub fn run(args: DeviceArgs, format: OutputFormat) -> CliResult<i32> {
    let out = block_on(|cancel| async move {
        let light = connect(&args, &cancel).await?;
        let product = light.product();
        Ok(InfoOutput {
            address: light.address().to_string(),
            product: format!("{product:?}"),
            product_code: product.code(),
            supports_color: product.supports_color(),
            vendor: light.vendor(),
            version: light.version(),
        })
    })?;

    print_report(&out, format);
    Ok(SUCCESS)
}

/// Firmware versions pack major in the high half, minor in the low half.
fn format_firmware(version: u32) -> String {
    format!("{}.{} ({version})", version >> 16, version & 0xFFFF)
}
