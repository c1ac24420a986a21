// Ingestion engine
// Validates `Date;ExecutionTime;Value` lines and folds them into a file summary

mod aggregate;
mod error;
mod ingest;
mod median;
mod parse;
mod validator;

pub use aggregate::{Aggregator, FileStats};
pub use error::{Error, Rejection, Result, ValidationError};
pub use ingest::{IngestedFile, ingest};
pub use median::median;
pub use parse::{parse_instant, parse_number};
pub use validator::{COLUMN_DELIMITER, LineValidator, MAX_ROWS, min_allowed_date};
