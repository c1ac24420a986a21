use chrono::{DateTime, Utc};
use std::io::{BufRead, ErrorKind};
use timescale_types::{CancellationToken, ParsedRow};
use tracing::debug;

use crate::aggregate::{Aggregator, FileStats};
use crate::error::{Error, Rejection, Result, ValidationError};
use crate::validator::LineValidator;

const INITIAL_CAPACITY: usize = 1024;
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Every accepted row of a file plus its folded statistics.
#[derive(Debug, Clone)]
pub struct IngestedFile {
    pub rows: Vec<ParsedRow>,
    pub stats: FileStats,
}

/// Stream `reader` line by line, validating and aggregating in a single pass.
///
/// Stops at the first invalid line. Lines are numbered from 1; failures about
/// the file as a whole carry line 0.
pub fn ingest<R: BufRead>(
    reader: R,
    now: DateTime<Utc>,
    cancel: &CancellationToken,
) -> Result<IngestedFile> {
    let validator = LineValidator::new(now);
    let mut aggregator = Aggregator::with_capacity(INITIAL_CAPACITY);
    let mut rows = Vec::with_capacity(INITIAL_CAPACITY);

    for (index, line) in reader.lines().enumerate() {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let line_number = index + 1;
        let line = match line {
            Ok(line) => line,
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                return Err(ValidationError::new(line_number, Rejection::NotUtf8).into());
            }
            Err(err) => return Err(err.into()),
        };

        let text = if index == 0 {
            line.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&line)
        } else {
            &line
        };

        let row = validator
            .check(text, rows.len())
            .map_err(|reason| ValidationError::new(line_number, reason))?;

        aggregator
            .push(&row)
            .map_err(|reason| ValidationError::new(line_number, reason))?;
        rows.push(row);
    }

    let stats = aggregator
        .finish()
        .ok_or_else(|| ValidationError::whole_file(Rejection::NoRows))?;

    debug!(rows = stats.count, "ingested stream");

    Ok(IngestedFile { rows, stats })
}
