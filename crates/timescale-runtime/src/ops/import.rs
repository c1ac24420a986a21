use chrono::Utc;
use std::io::BufRead;
use std::time::Instant;
use timescale_engine::{Rejection, ValidationError, ingest};
use timescale_index::Database;
use timescale_types::{CancellationToken, FileName, ImportOutcome, MAX_FILE_NAME_LEN};
use tracing::{info, warn};

use crate::{Error, Result};

/// Turn a caller-supplied upload name into the identifier rows are stored under.
pub fn normalize_file_name(raw: &str) -> Result<FileName> {
    if raw.trim().is_empty() {
        return Err(ValidationError::whole_file(Rejection::MissingFileName).into());
    }

    let name = FileName::sanitize(raw);
    if name.is_blank() {
        return Err(Error::InvalidRequest("Invalid file name.".to_string()));
    }

    if name.as_str().chars().count() > MAX_FILE_NAME_LEN {
        return Err(ValidationError::whole_file(Rejection::FileNameTooLong).into());
    }

    Ok(name)
}

/// Parse, summarize and store one file, replacing anything stored under its name.
///
/// "Now" is captured once, before the first line is read.
pub fn import<R: BufRead>(
    db: &mut Database,
    raw_name: &str,
    reader: R,
    batch_size: usize,
    cancel: &CancellationToken,
) -> Result<ImportOutcome> {
    let file_name = normalize_file_name(raw_name)?;
    let started = Instant::now();
    let now = Utc::now();

    info!(file_name = %file_name, "import started");

    let ingested = match ingest(reader, now, cancel) {
        Ok(ingested) => ingested,
        Err(err) => {
            info!(file_name = %file_name, error = %err, "import rejected");
            return Err(err.into());
        }
    };

    let row_count = ingested.rows.len();
    let summary = ingested.stats.into_summary(file_name.clone());

    if let Err(err) = db.replace_file(&summary, &ingested.rows, batch_size, cancel) {
        warn!(file_name = %file_name, error = %err, "import not stored");
        return Err(err.into());
    }

    info!(
        file_name = %file_name,
        rows = row_count,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "import finished"
    );

    Ok(ImportOutcome {
        file_name,
        row_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use std::io::Cursor;

    const TWO_ROWS: &str = "2024-01-01T00:00:00Z;1.5;10\n2024-01-02T00:00:00Z;2.5;20";

    fn run(db: &mut Database, name: &str, content: &str) -> Result<ImportOutcome> {
        import(
            db,
            name,
            Cursor::new(content.as_bytes().to_vec()),
            1000,
            &CancellationToken::new(),
        )
    }

    fn detail(err: &Error) -> String {
        err.to_problem().detail
    }

    #[test]
    fn test_import_stores_summary() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        let outcome = run(&mut db, "t.csv", TWO_ROWS)?;

        assert_eq!(outcome.file_name.as_str(), "t.csv");
        assert_eq!(outcome.row_count, 2);

        let summary = db.get_summary(&FileName::from("t.csv"))?.unwrap();
        assert_eq!(summary.delta_seconds, 86400.0);
        assert_eq!(summary.avg_execution_time, 2.0);
        assert_eq!(summary.avg_value, 15.0);
        assert_eq!(summary.median_value, 15.0);
        assert_eq!(summary.min_value, 10.0);
        assert_eq!(summary.max_value, 20.0);
        Ok(())
    }

    #[test]
    fn test_path_is_reduced_to_file_name() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        let outcome = run(&mut db, "uploads/2024/t.csv", TWO_ROWS)?;
        assert_eq!(outcome.file_name.as_str(), "t.csv");

        let outcome = run(&mut db, r"C:\data\w.csv", TWO_ROWS)?;
        assert_eq!(outcome.file_name.as_str(), "w.csv");
        Ok(())
    }

    #[test]
    fn test_blank_name_is_required() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        let err = run(&mut db, "   ", TWO_ROWS).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(detail(&err), "FileName is required.");
        Ok(())
    }

    #[test]
    fn test_directory_only_name_is_invalid() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        let err = run(&mut db, "uploads/", TWO_ROWS).unwrap_err();

        assert_eq!(err.status(), 400);
        assert_eq!(detail(&err), "Invalid file name.");
        Ok(())
    }

    #[test]
    fn test_long_name_is_rejected() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        let name = "a".repeat(MAX_FILE_NAME_LEN + 1);
        let err = run(&mut db, &name, TWO_ROWS).unwrap_err();
        assert_eq!(detail(&err), "FileName must be at most 260 characters.");

        let name = "a".repeat(MAX_FILE_NAME_LEN);
        assert!(run(&mut db, &name, TWO_ROWS).is_ok());
        Ok(())
    }

    #[test]
    fn test_invalid_line_stores_nothing() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        let err = run(&mut db, "bad.csv", "2024-01-01T00:00:00Z;1;1\n2024-01-01;x;1").unwrap_err();

        assert_eq!(detail(&err), "Line 2: invalid ExecutionTime 'x'");
        assert!(db.get_summary(&FileName::from("bad.csv"))?.is_none());
        assert_eq!(db.count_values(&FileName::from("bad.csv"))?, 0);
        Ok(())
    }

    #[test]
    fn test_empty_content_has_no_line_prefix() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        let err = run(&mut db, "empty.csv", "").unwrap_err();
        assert_eq!(detail(&err), "file must contain at least 1 row");
        Ok(())
    }

    #[test]
    fn test_reimport_replaces_previous_rows() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        run(&mut db, "a.csv", "2024-01-01T00:00:00Z;1;1\n2024-01-02T00:00:00Z;1;2\n2024-01-03T00:00:00Z;1;3")?;
        run(&mut db, "a.csv", "2024-02-01T00:00:00Z;4;40")?;

        let name = FileName::from("a.csv");
        assert_eq!(db.count_values(&name)?, 1);
        let summary = db.get_summary(&name)?.unwrap();
        assert_eq!(summary.avg_value, 40.0);
        assert_eq!(summary.delta_seconds, 0.0);
        Ok(())
    }

    #[test]
    fn test_failed_reimport_keeps_previous_data() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        run(&mut db, "a.csv", TWO_ROWS)?;
        assert!(run(&mut db, "a.csv", "2024-01-01T00:00:00Z;-1;1").is_err());

        let name = FileName::from("a.csv");
        assert_eq!(db.count_values(&name)?, 2);
        assert_eq!(db.get_summary(&name)?.unwrap().avg_value, 15.0);
        Ok(())
    }

    #[test]
    fn test_cancelled_import_stores_nothing() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = import(
            &mut db,
            "c.csv",
            Cursor::new(TWO_ROWS.as_bytes().to_vec()),
            1000,
            &cancel,
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(db.get_summary(&FileName::from("c.csv"))?.is_none());
        Ok(())
    }
}
