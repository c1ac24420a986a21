mod args;
mod commands;
mod handlers;
mod logging;
mod output;
mod report;
pub mod types;

pub use args::{Cli, Commands, ResultsArgs};
pub use commands::run;
pub use report::report_error;
