use anyhow::Result;
use timescale_runtime::Timescale;
use timescale_types::ResultsQuery;

use crate::args::ResultsArgs;
use crate::output;
use crate::types::OutputFormat;

pub fn handle(workspace: &Timescale, args: ResultsArgs, format: OutputFormat) -> Result<()> {
    let query = ResultsQuery::from(args);
    let page = workspace.results(&query)?;

    match format {
        OutputFormat::Json => output::print_json(&page),
        OutputFormat::Csv => output::print_csv(&page.items),
        OutputFormat::Plain => output::print_results(&page),
    }
}
