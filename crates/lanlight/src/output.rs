use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// A command result: serialized as-is for JSON, shown as labelled rows
/// otherwise.
pub trait Report: Serialize {
    fn title(&self) -> &'static str;
    fn rows(&self) -> Vec<(&'static str, String)>;
}

/// Outcome of a command that changes a light.
#[derive(Serialize)]
pub struct ChangeReport {
    pub address: String,
    pub change: &'static str,
    pub value: String,
    pub duration_ms: u128,
    pub acknowledged: bool,
}

impl Report for ChangeReport {
    fn title(&self) -> &'static str {
        "Light Updated"
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Address", self.address.clone()),
            ("Change", self.change.to_string()),
            ("Value", self.value.clone()),
            ("Transition", format!("{}ms", self.duration_ms)),
            ("Acknowledged", self.acknowledged.to_string()),
        ]
    }
}

pub fn print_report<R: Report>(report: &R, format: OutputFormat) {
    println!("{}", render(report, format));
}

pub fn render<R: Report>(report: &R, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (name, value) in report.rows() {
                table.add_row(vec![name.to_string(), value]);
            }
            table.to_string()
        }
        OutputFormat::Pretty => {
            let mut out = format!("{}:", report.title());
            for (name, value) in report.rows() {
                out.push_str(&format!("\n  {:<14}{}", format!("{name}:"), value));
            }
            out
        }
    }
}
