use rusqlite::Connection;

use crate::{Error, Result};

// Schema version (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 1;

// NOTE: Storage layout
//
// - file_values holds every imported row; many rows per file_name
// - file_summaries holds exactly one row per file_name (primary key)
// - Timestamps are fixed-width UTC text so ORDER BY and range filters on the
//   text column are chronological
// - file_name_folded is the Unicode-lowercased name, the target of the
//   case-insensitive substring filter

pub fn init_schema(conn: &Connection) -> Result<()> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version != 0 && current_version != SCHEMA_VERSION {
        return Err(Error::UnsupportedSchema(current_version));
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS file_values (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            file_name TEXT NOT NULL,
            ts TEXT NOT NULL,
            execution_time REAL NOT NULL,
            value REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS file_summaries (
            file_name TEXT PRIMARY KEY,
            file_name_folded TEXT NOT NULL,
            min_date TEXT NOT NULL,
            delta_seconds REAL NOT NULL,
            avg_execution_time REAL NOT NULL,
            avg_value REAL NOT NULL,
            median_value REAL NOT NULL,
            min_value REAL NOT NULL,
            max_value REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_values_file_ts ON file_values(file_name, ts DESC);
        CREATE INDEX IF NOT EXISTS idx_summaries_min_date ON file_summaries(min_date DESC, file_name);
        CREATE INDEX IF NOT EXISTS idx_summaries_avg_value ON file_summaries(avg_value);
        CREATE INDEX IF NOT EXISTS idx_summaries_avg_exec ON file_summaries(avg_execution_time);
        CREATE INDEX IF NOT EXISTS idx_summaries_folded ON file_summaries(file_name_folded);
        "#,
    )?;

    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

    Ok(())
}
