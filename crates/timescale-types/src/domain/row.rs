use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FileName;

/// One validated `Date;ExecutionTime;Value` line. Lives only for the duration of an import.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedRow {
    pub timestamp: DateTime<Utc>,
    pub execution_time: f64,
    pub value: f64,
}

/// A persisted row, owned by the file it was imported from.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    pub id: i64,
    pub file_name: FileName,
    pub timestamp: DateTime<Utc>,
    pub execution_time: f64,
    pub value: f64,
}

/// Entry of the latest-values listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestValue {
    pub date: DateTime<Utc>,
    pub execution_time: f64,
    pub value: f64,
}

impl From<StoredRow> for LatestValue {
    fn from(row: StoredRow) -> Self {
        Self {
            date: row.timestamp,
            execution_time: row.execution_time,
            value: row.value,
        }
    }
}
