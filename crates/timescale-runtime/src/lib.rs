pub mod config;
pub mod error;
pub mod ops;
mod workspace;

pub use config::{Config, DatabaseConfig, ImportConfig, QueryConfig, resolve_workspace_path};
pub use error::{Error, ErrorKind, Result};
pub use ops::{import, latest_values, results, validate_results_query};
pub use workspace::Timescale;
