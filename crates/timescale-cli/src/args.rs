use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use timescale_types::ResultsQuery;

use crate::types::{LogLevel, OutputFormat};

#[derive(Parser)]
#[command(name = "timescale")]
#[command(about = "Import time-series files and query their summaries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (defaults to $TIMESCALE_PATH, then the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    /// Overrides `log_level` from config.toml (default: warn)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a `Date;ExecutionTime;Value` file, replacing any earlier import of the same name
    Import {
        /// File to read, or "-" for stdin
        path: String,

        /// Name to store the file under (defaults to the file name of PATH)
        #[arg(long)]
        name: Option<String>,
    },

    /// Show the ten most recent values of an imported file
    Latest {
        file_name: String,
    },

    /// List file summaries, newest first
    Results(ResultsArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct ResultsArgs {
    /// Case-insensitive substring of the file name
    #[arg(long)]
    pub file_name: Option<String>,

    #[arg(long, value_parser = parse_date)]
    pub min_date_from: Option<DateTime<Utc>>,

    #[arg(long, value_parser = parse_date)]
    pub min_date_to: Option<DateTime<Utc>>,

    #[arg(long, allow_negative_numbers = true)]
    pub avg_value_min: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub avg_value_max: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub avg_execution_time_min: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub avg_execution_time_max: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub page: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub page_size: Option<i64>,
}

impl From<ResultsArgs> for ResultsQuery {
    fn from(args: ResultsArgs) -> Self {
        ResultsQuery {
            file_name: args.file_name,
            min_date_from: args.min_date_from,
            min_date_to: args.min_date_to,
            avg_value_min: args.avg_value_min,
            avg_value_max: args.avg_value_max,
            avg_execution_time_min: args.avg_execution_time_min,
            avg_execution_time_max: args.avg_execution_time_max,
            page: args.page,
            page_size: args.page_size,
        }
    }
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    timescale_engine::parse_instant(raw).ok_or_else(|| format!("invalid date '{}'", raw))
}
