use anyhow::{Result, anyhow};
use std::path::PathBuf;
use timescale_runtime::{Config, Timescale, resolve_workspace_path};
use timescale_types::CancellationToken;
use tracing::{debug, warn};

use super::args::{Cli, Commands};
use super::handlers;
use super::logging;

pub fn run(cli: Cli, cancel: &CancellationToken) -> Result<()> {
    let data_dir: PathBuf = setup(resolve_workspace_path(cli.data_dir.as_deref()))?;
    let config = setup(Config::load(&data_dir))?;

    let level = logging::resolve_level(cli.log_level, config.log_level.as_deref())?;
    logging::init(level)?;
    debug!(data_dir = %data_dir.display(), "workspace resolved");

    let mut workspace = setup(Timescale::open_with_config(&data_dir, config))?;

    match cli.command {
        Commands::Import { path, name } => {
            install_interrupt_handler(cancel);
            handlers::import::handle(&mut workspace, &path, name.as_deref(), cli.format, cancel)
        }

        Commands::Latest { file_name } => {
            handlers::latest::handle(&workspace, &file_name, cli.format)
        }

        Commands::Results(args) => handlers::results::handle(&workspace, args, cli.format),
    }
}

/// Failures before any command runs are reported verbatim, not as a problem envelope.
fn setup<T>(result: timescale_runtime::Result<T>) -> Result<T> {
    result.map_err(|err| anyhow!("{}", err))
}

/// Ctrl-C trips `cancel`; the import then rolls back instead of committing.
fn install_interrupt_handler(cancel: &CancellationToken) {
    let token = cancel.clone();
    if let Err(err) = ctrlc::set_handler(move || token.cancel()) {
        warn!(error = %err, "could not install Ctrl-C handler");
    }
}
