use chrono::{DateTime, TimeZone, Utc};
use timescale_types::ParsedRow;

use crate::error::Rejection;
use crate::parse::{parse_instant, parse_number};

pub const COLUMN_DELIMITER: char = ';';

/// Hard cap on accepted rows per file.
pub const MAX_ROWS: usize = 10_000;

/// Earliest instant a row may carry: 2000-01-01T00:00:00Z.
pub fn min_allowed_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Applies the per-line rules in order; the first violated rule wins.
///
/// `now` is captured once per import so every line is judged against the same
/// upper bound.
#[derive(Debug, Clone)]
pub struct LineValidator {
    min_date: DateTime<Utc>,
    now: DateTime<Utc>,
}

impl LineValidator {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            min_date: min_allowed_date(),
            now,
        }
    }

    /// Validate one line given how many rows were accepted before it.
    pub fn check(&self, line: &str, accepted: usize) -> Result<ParsedRow, Rejection> {
        if line.trim().is_empty() {
            return Err(Rejection::EmptyLine);
        }

        let mut fields = line.split(COLUMN_DELIMITER);
        let (Some(raw_date), Some(raw_exec), Some(raw_value), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(Rejection::ColumnCount);
        };

        if accepted >= MAX_ROWS {
            return Err(Rejection::TooManyRows);
        }

        let timestamp =
            parse_instant(raw_date).ok_or_else(|| Rejection::InvalidDate(raw_date.to_string()))?;
        let execution_time = parse_number(raw_exec)
            .ok_or_else(|| Rejection::InvalidExecutionTime(raw_exec.to_string()))?;
        let value =
            parse_number(raw_value).ok_or_else(|| Rejection::InvalidValue(raw_value.to_string()))?;

        if timestamp < self.min_date {
            return Err(Rejection::DateTooEarly);
        }
        if timestamp > self.now {
            return Err(Rejection::DateInFuture);
        }
        if execution_time < 0.0 {
            return Err(Rejection::NegativeExecutionTime);
        }
        if value < 0.0 {
            return Err(Rejection::NegativeValue);
        }

        Ok(ParsedRow {
            timestamp,
            execution_time,
            value,
        })
    }
}
