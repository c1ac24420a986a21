use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use timescale_runtime::{Error, Timescale};
use timescale_types::CancellationToken;

use crate::output;
use crate::types::OutputFormat;

const STDIN_PATH: &str = "-";

pub fn handle(
    workspace: &mut Timescale,
    path: &str,
    name: Option<&str>,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let outcome = if path == STDIN_PATH {
        let Some(name) = name else {
            return Err(Error::InvalidRequest(
                "--name is required when importing from stdin.".to_string(),
            )
            .into());
        };
        let stdin = std::io::stdin();
        workspace.import(name, stdin.lock(), cancel)?
    } else {
        let file = File::open(path).with_context(|| format!("failed to open '{}'", path))?;
        workspace.import(name.unwrap_or(path), BufReader::new(file), cancel)?
    };

    match format {
        OutputFormat::Json => output::print_json(&outcome)?,
        OutputFormat::Plain | OutputFormat::Csv => output::print_import(&outcome),
    }

    Ok(())
}
