use rusqlite::types::Value;
use rusqlite::{Connection, params, params_from_iter};
use timescale_types::{FileName, ParsedRow, StoredRow, format_timestamp};

use super::summaries::timestamp_column;
use crate::Result;

const COLUMNS_PER_ROW: usize = 4;

pub fn delete_for_file(conn: &Connection, file_name: &FileName) -> Result<usize> {
    let removed = conn.execute(
        "DELETE FROM file_values WHERE file_name = ?1",
        [file_name.as_str()],
    )?;

    Ok(removed)
}

/// Insert `rows` with a single multi-row statement.
pub fn insert_batch(conn: &Connection, file_name: &FileName, rows: &[ParsedRow]) -> Result<usize> {
    if rows.is_empty() {
        return Ok(0);
    }

    let placeholders = vec!["(?, ?, ?, ?)"; rows.len()].join(", ");
    let sql = format!(
        "INSERT INTO file_values (file_name, ts, execution_time, value) VALUES {}",
        placeholders
    );

    let mut values = Vec::with_capacity(rows.len() * COLUMNS_PER_ROW);
    for row in rows {
        values.push(Value::Text(file_name.as_str().to_string()));
        values.push(Value::Text(format_timestamp(&row.timestamp)));
        values.push(Value::Real(row.execution_time));
        values.push(Value::Real(row.value));
    }

    let mut stmt = conn.prepare_cached(&sql)?;
    let inserted = stmt.execute(params_from_iter(values))?;

    Ok(inserted)
}

/// Most recent rows of a file, newest first.
pub fn latest(conn: &Connection, file_name: &FileName, limit: usize) -> Result<Vec<StoredRow>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, file_name, ts, execution_time, value
        FROM file_values
        WHERE file_name = ?1
        ORDER BY ts DESC, id DESC
        LIMIT ?2
        "#,
    )?;

    let rows = stmt
        .query_map(params![file_name.as_str(), limit as i64], |row| {
            Ok(StoredRow {
                id: row.get(0)?,
                file_name: FileName::from(row.get::<_, String>(1)?),
                timestamp: timestamp_column(row, 2)?,
                execution_time: row.get(3)?,
                value: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(rows)
}

pub fn count_for_file(conn: &Connection, file_name: &FileName) -> Result<u64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM file_values WHERE file_name = ?1",
        [file_name.as_str()],
        |row| row.get(0),
    )?;

    Ok(count as u64)
}
