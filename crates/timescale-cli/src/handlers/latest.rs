use anyhow::Result;
use timescale_runtime::Timescale;

use crate::output;
use crate::types::OutputFormat;

pub fn handle(workspace: &Timescale, file_name: &str, format: OutputFormat) -> Result<()> {
    let values = workspace.latest_values(file_name)?;

    match format {
        OutputFormat::Json => output::print_json(&values),
        OutputFormat::Csv => output::print_csv(&values),
        OutputFormat::Plain => output::print_latest(file_name, &values),
    }
}
