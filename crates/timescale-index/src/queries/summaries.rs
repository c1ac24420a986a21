use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, ToSql, params};
use timescale_types::{
    FileName, FileSummary, PageRequest, SummaryFilter, format_timestamp, parse_timestamp,
};

use crate::Result;

const SUMMARY_COLUMNS: &str = "file_name, min_date, delta_seconds, avg_execution_time, avg_value, median_value, min_value, max_value";

pub fn delete(conn: &Connection, file_name: &FileName) -> Result<usize> {
    let removed = conn.execute(
        "DELETE FROM file_summaries WHERE file_name = ?1",
        [file_name.as_str()],
    )?;

    Ok(removed)
}

pub fn insert(conn: &Connection, summary: &FileSummary) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO file_summaries (file_name, file_name_folded, min_date, delta_seconds,
                                    avg_execution_time, avg_value, median_value, min_value, max_value)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
        params![
            summary.file_name.as_str(),
            summary.file_name.folded(),
            format_timestamp(&summary.min_date),
            summary.delta_seconds,
            summary.avg_execution_time,
            summary.avg_value,
            summary.median_value,
            summary.min_value,
            summary.max_value
        ],
    )?;

    Ok(())
}

pub fn get(conn: &Connection, file_name: &FileName) -> Result<Option<FileSummary>> {
    let query = format!(
        "SELECT {} FROM file_summaries WHERE file_name = ?1",
        SUMMARY_COLUMNS
    );

    let summary = conn
        .query_row(&query, [file_name.as_str()], summary_from_row)
        .optional()?;

    Ok(summary)
}

pub fn count(conn: &Connection, filter: &SummaryFilter) -> Result<u64> {
    let (where_clause, params) = build_where(filter);
    let query = format!("SELECT COUNT(*) FROM file_summaries {}", where_clause);

    let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let total: i64 = conn.query_row(&query, param_refs.as_slice(), |row| row.get(0))?;

    Ok(total as u64)
}

/// One page of matching summaries, newest `min_date` first, ties by name.
pub fn page(
    conn: &Connection,
    filter: &SummaryFilter,
    page: &PageRequest,
) -> Result<Vec<FileSummary>> {
    let (where_clause, mut params) = build_where(filter);
    params.push(Box::new(i64::from(page.page_size)));
    params.push(Box::new(page.offset() as i64));

    let query = format!(
        r#"
        SELECT {}
        FROM file_summaries
        {}
        ORDER BY min_date DESC, file_name ASC
        LIMIT ? OFFSET ?
        "#,
        SUMMARY_COLUMNS, where_clause
    );

    let mut stmt = conn.prepare(&query)?;
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let summaries = stmt
        .query_map(param_refs.as_slice(), summary_from_row)?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(summaries)
}

fn build_where(filter: &SummaryFilter) -> (String, Vec<Box<dyn ToSql>>) {
    let mut where_clauses: Vec<&str> = Vec::new();
    let mut params: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(needle) = &filter.file_name {
        where_clauses.push("instr(file_name_folded, ?) > 0");
        params.push(Box::new(needle.to_lowercase()));
    }

    if let Some(from) = &filter.min_date.min {
        where_clauses.push("min_date >= ?");
        params.push(Box::new(format_timestamp(from)));
    }
    if let Some(to) = &filter.min_date.max {
        where_clauses.push("min_date <= ?");
        params.push(Box::new(format_timestamp(to)));
    }

    if let Some(min) = filter.avg_value.min {
        where_clauses.push("avg_value >= ?");
        params.push(Box::new(min));
    }
    if let Some(max) = filter.avg_value.max {
        where_clauses.push("avg_value <= ?");
        params.push(Box::new(max));
    }

    if let Some(min) = filter.avg_execution_time.min {
        where_clauses.push("avg_execution_time >= ?");
        params.push(Box::new(min));
    }
    if let Some(max) = filter.avg_execution_time.max {
        where_clauses.push("avg_execution_time <= ?");
        params.push(Box::new(max));
    }

    let where_clause = if where_clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", where_clauses.join(" AND "))
    };

    (where_clause, params)
}

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<FileSummary> {
    Ok(FileSummary {
        file_name: FileName::from(row.get::<_, String>(0)?),
        min_date: timestamp_column(row, 1)?,
        delta_seconds: row.get(2)?,
        avg_execution_time: row.get(3)?,
        avg_value: row.get(4)?,
        median_value: row.get(5)?,
        min_value: row.get(6)?,
        max_value: row.get(7)?,
    })
}

pub(crate) fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("malformed stored timestamp '{}'", raw).into(),
        )
    })
}
