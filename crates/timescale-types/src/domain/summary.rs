use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FileName;

/// Aggregate statistics computed once per imported file.
///
/// `delta_seconds` is `max(timestamp) - min(timestamp)` and is never negative.
/// For even row counts the median is the mean of the two central values, so it
/// is not guaranteed to coincide with any stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub file_name: FileName,
    pub min_date: DateTime<Utc>,
    pub delta_seconds: f64,
    pub avg_execution_time: f64,
    pub avg_value: f64,
    pub median_value: f64,
    pub min_value: f64,
    pub max_value: f64,
}

/// Result of a successful import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub file_name: FileName,
    pub row_count: usize,
}
