use anyhow::{Context, Result, bail};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::types::LogLevel;

const DEFAULT_LEVEL: Level = Level::WARN;

/// Pick the log level: the command-line flag wins over `log_level` in config.
pub fn resolve_level(flag: Option<LogLevel>, configured: Option<&str>) -> Result<Level> {
    if let Some(level) = flag {
        return Ok(level.as_tracing());
    }

    match configured {
        Some(raw) => match Level::from_str(raw.trim()) {
            Ok(level) => Ok(level),
            Err(_) => bail!("invalid log_level '{}' in config.toml", raw),
        },
        None => Ok(DEFAULT_LEVEL),
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays parseable.
pub fn init(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install log subscriber")?;
    Ok(())
}
