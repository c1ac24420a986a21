use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 200;

/// How many rows the latest-values listing returns at most.
pub const LATEST_VALUES_LIMIT: usize = 10;

/// Raw results-listing parameters as received from the caller.
///
/// Nothing here is trusted yet: ranges may be reversed and pagination may be
/// out of bounds. Validation turns it into a [`SummaryFilter`] plus a
/// [`PageRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsQuery {
    pub file_name: Option<String>,
    pub min_date_from: Option<DateTime<Utc>>,
    pub min_date_to: Option<DateTime<Utc>>,
    pub avg_value_min: Option<f64>,
    pub avg_value_max: Option<f64>,
    pub avg_execution_time_min: Option<f64>,
    pub avg_execution_time_max: Option<f64>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Validated filter over stored summaries. Every range has `min <= max`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryFilter {
    /// Case-insensitive substring of the file name.
    pub file_name: Option<String>,
    pub min_date: RangeFilter<DateTime<Utc>>,
    pub avg_value: RangeFilter<f64>,
    pub avg_execution_time: RangeFilter<f64>,
}

/// Inclusive, optionally open-ended range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: PartialOrd> RangeFilter<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    /// A range is reversed only when both ends are present and `min > max`.
    pub fn is_reversed(&self) -> bool {
        match (&self.min, &self.max) {
            (Some(min), Some(max)) => min > max,
            _ => false,
        }
    }
}

/// One-based page within bounds `page >= 1`, `1 <= page_size <= MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A page of results plus the total number of matches before slicing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub items: Vec<T>,
}
