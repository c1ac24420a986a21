//! Integration tests for replace-on-reimport against an on-disk database
//!
//! These tests open several connections to the same file to verify that a
//! replace is visible as a single unit and that the last commit wins.

use chrono::{Duration, TimeZone, Utc};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tempfile::TempDir;
use timescale_index::{Database, SCHEMA_VERSION};
use timescale_types::{CancellationToken, FileName, FileSummary, ParsedRow};

const ROWS_PER_IMPORT: usize = 3_000;

fn dataset(marker: f64) -> (FileSummary, Vec<ParsedRow>) {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let rows: Vec<ParsedRow> = (0..ROWS_PER_IMPORT)
        .map(|i| ParsedRow {
            timestamp: start + Duration::seconds(i as i64),
            execution_time: 1.0,
            value: marker,
        })
        .collect();

    let summary = FileSummary {
        file_name: FileName::from("shared.csv"),
        min_date: start,
        delta_seconds: (ROWS_PER_IMPORT - 1) as f64,
        avg_execution_time: 1.0,
        avg_value: marker,
        median_value: marker,
        min_value: marker,
        max_value: marker,
    };

    (summary, rows)
}

fn import(path: &Path, marker: f64) {
    let mut db = Database::open(path).unwrap();
    let (summary, rows) = dataset(marker);
    db.replace_file(&summary, &rows, 1000, &CancellationToken::new())
        .unwrap();
}

#[test]
fn test_readers_never_see_mixed_imports() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("timescale.db");
    import(&db_path, 1.0);

    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let path = db_path.clone();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let db = Database::open(&path).unwrap();
            let name = FileName::from("shared.csv");
            let mut reads = 0;
            while !done.load(Ordering::SeqCst) || reads == 0 {
                let rows = db.latest_values(&name, 10).unwrap();
                assert_eq!(rows.len(), 10, "file must never appear empty");
                let marker = rows[0].value;
                assert!(
                    rows.iter().all(|r| r.value == marker),
                    "observed rows from two different imports"
                );
                reads += 1;
            }
            reads
        })
    };

    let writers: Vec<_> = [1.0, 2.0]
        .into_iter()
        .map(|marker| {
            let path = db_path.clone();
            thread::spawn(move || {
                for _ in 0..5 {
                    import(&path, marker);
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }
    done.store(true, Ordering::SeqCst);
    assert!(reader.join().unwrap() > 0);

    let db = Database::open(&db_path).unwrap();
    let name = FileName::from("shared.csv");
    assert_eq!(db.count_values(&name).unwrap(), ROWS_PER_IMPORT as u64);
}

#[test]
fn test_last_commit_wins() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("timescale.db");

    import(&db_path, 1.0);
    import(&db_path, 2.0);

    let db = Database::open(&db_path).unwrap();
    let name = FileName::from("shared.csv");
    let summary = db.get_summary(&name).unwrap().unwrap();
    assert_eq!(summary.avg_value, 2.0);
    assert_eq!(db.count_values(&name).unwrap(), ROWS_PER_IMPORT as u64);
    assert!(
        db.latest_values(&name, 10)
            .unwrap()
            .iter()
            .all(|r| r.value == 2.0)
    );
}

#[test]
fn test_reopen_keeps_data_and_version() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("timescale.db");

    import(&db_path, 3.0);

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, SCHEMA_VERSION);
    drop(conn);

    let db = Database::open(&db_path).unwrap();
    assert!(db.get_summary(&FileName::from("shared.csv")).unwrap().is_some());
}

#[test]
fn test_foreign_schema_version_is_refused() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("timescale.db");

    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute_batch("CREATE TABLE other (id INTEGER); PRAGMA user_version = 99;")
            .unwrap();
    }

    match Database::open(&db_path) {
        Err(timescale_index::Error::UnsupportedSchema(99)) => {}
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("opening a foreign schema must fail"),
    }

    // The foreign table is untouched
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'other'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 1);
}
