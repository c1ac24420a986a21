use chrono::{DateTime, Utc};
use timescale_types::{FileName, FileSummary, ParsedRow};

use crate::error::Rejection;
use crate::median::median;

/// Statistics for one file, before it is bound to a file name.
#[derive(Debug, Clone, PartialEq)]
pub struct FileStats {
    pub count: usize,
    pub min_date: DateTime<Utc>,
    pub max_date: DateTime<Utc>,
    pub delta_seconds: f64,
    pub avg_execution_time: f64,
    pub avg_value: f64,
    pub median_value: f64,
    pub min_value: f64,
    pub max_value: f64,
}

impl FileStats {
    pub fn into_summary(self, file_name: FileName) -> FileSummary {
        FileSummary {
            file_name,
            min_date: self.min_date,
            delta_seconds: self.delta_seconds,
            avg_execution_time: self.avg_execution_time,
            avg_value: self.avg_value,
            median_value: self.median_value,
            min_value: self.min_value,
            max_value: self.max_value,
        }
    }
}

/// Running statistics folded one row at a time.
#[derive(Debug, Clone)]
pub struct Aggregator {
    date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    sum_execution_time: f64,
    sum_value: f64,
    min_value: f64,
    max_value: f64,
    values: Vec<f64>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl Aggregator {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            date_range: None,
            sum_execution_time: 0.0,
            sum_value: 0.0,
            min_value: f64::INFINITY,
            max_value: f64::NEG_INFINITY,
            values: Vec::with_capacity(capacity),
        }
    }

    /// Fold one row in. A row that would push either running total past
    /// `f64::MAX` is refused and leaves the aggregator untouched.
    pub fn push(&mut self, row: &ParsedRow) -> Result<(), Rejection> {
        let sum_execution_time = self.sum_execution_time + row.execution_time;
        let sum_value = self.sum_value + row.value;
        if !sum_execution_time.is_finite() || !sum_value.is_finite() {
            return Err(Rejection::SumOverflow);
        }

        self.date_range = Some(match self.date_range {
            None => (row.timestamp, row.timestamp),
            Some((min, max)) => (min.min(row.timestamp), max.max(row.timestamp)),
        });

        self.sum_execution_time = sum_execution_time;
        self.sum_value = sum_value;
        self.min_value = self.min_value.min(row.value);
        self.max_value = self.max_value.max(row.value);
        self.values.push(row.value);
        Ok(())
    }

    /// Finalize the statistics. `None` when no row was pushed.
    pub fn finish(mut self) -> Option<FileStats> {
        let (min_date, max_date) = self.date_range?;
        let count = self.values.len();
        let n = count as f64;
        let delta = max_date - min_date;
        let delta_seconds = delta
            .num_microseconds()
            .map_or(delta.num_seconds() as f64, |us| us as f64 / 1_000_000.0);

        Some(FileStats {
            count,
            min_date,
            max_date,
            delta_seconds,
            avg_execution_time: self.sum_execution_time / n,
            avg_value: self.sum_value / n,
            median_value: median(&mut self.values),
            min_value: self.min_value,
            max_value: self.max_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(day: u32, execution_time: f64, value: f64) -> ParsedRow {
        ParsedRow {
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            execution_time,
            value,
        }
    }

    #[test]
    fn test_empty_aggregator_has_no_stats() {
        assert!(Aggregator::default().finish().is_none());
    }

    #[test]
    fn test_two_rows() {
        let mut agg = Aggregator::default();
        agg.push(&row(1, 1.5, 10.0)).unwrap();
        agg.push(&row(2, 2.5, 20.0)).unwrap();

        let stats = agg.finish().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min_date, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(stats.delta_seconds, 86400.0);
        assert_eq!(stats.avg_execution_time, 2.0);
        assert_eq!(stats.avg_value, 15.0);
        assert_eq!(stats.median_value, 15.0);
        assert_eq!(stats.min_value, 10.0);
        assert_eq!(stats.max_value, 20.0);
    }

    #[test]
    fn test_out_of_order_dates() {
        let mut agg = Aggregator::default();
        agg.push(&row(5, 0.0, 3.0)).unwrap();
        agg.push(&row(2, 0.0, 1.0)).unwrap();
        agg.push(&row(9, 0.0, 2.0)).unwrap();

        let stats = agg.finish().unwrap();
        assert_eq!(stats.min_date, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
        assert_eq!(stats.max_date, Utc.with_ymd_and_hms(2024, 1, 9, 0, 0, 0).unwrap());
        assert_eq!(stats.delta_seconds, 7.0 * 86400.0);
        assert_eq!(stats.median_value, 2.0);
        assert!(stats.min_value <= stats.max_value);
    }

    #[test]
    fn test_single_row_has_zero_delta() {
        let mut agg = Aggregator::default();
        agg.push(&row(3, 4.0, 7.0)).unwrap();

        let stats = agg.finish().unwrap();
        assert_eq!(stats.delta_seconds, 0.0);
        assert_eq!(stats.avg_value, 7.0);
        assert_eq!(stats.median_value, 7.0);
        assert_eq!(stats.min_value, 7.0);
        assert_eq!(stats.max_value, 7.0);
    }

    #[test]
    fn test_sub_second_delta() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut agg = Aggregator::default();
        for offset_ms in [0, 250] {
            agg.push(&ParsedRow {
                timestamp: base + chrono::Duration::milliseconds(offset_ms),
                execution_time: 0.0,
                value: 0.0,
            })
            .unwrap();
        }

        assert_eq!(agg.finish().unwrap().delta_seconds, 0.25);
    }

    #[test]
    fn test_overflowing_total_is_refused() {
        let mut agg = Aggregator::default();
        agg.push(&row(1, 0.0, 1e308)).unwrap();
        assert_eq!(agg.push(&row(2, 0.0, 1e308)), Err(Rejection::SumOverflow));
        assert_eq!(agg.push(&row(2, f64::MAX, 0.0)), Ok(()));
        assert_eq!(agg.push(&row(3, f64::MAX, 0.0)), Err(Rejection::SumOverflow));

        let stats = agg.finish().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.avg_value, 0.5e308);
        assert!(stats.avg_execution_time.is_finite());
        assert_eq!(stats.max_value, 1e308);
    }
}
