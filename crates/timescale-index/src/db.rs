use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use std::time::Duration;
use timescale_types::{
    CancellationToken, FileName, FileSummary, Page, PageRequest, ParsedRow, StoredRow,
    SummaryFilter,
};
use tracing::{debug, info};

use crate::queries::{summaries, values};
use crate::schema;
use crate::{Error, Result};

pub const DEFAULT_BATCH_SIZE: usize = 1000;

// 4 bound parameters per row must stay under SQLite's variable limit (32766)
pub const MAX_BATCH_SIZE: usize = 5000;

pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// NOTE: Transaction model
//
// - Replacing a file is one IMMEDIATE transaction: concurrent importers queue
//   on the write lock and whichever commits last wins
// - WAL journal: readers see the last committed state for the whole of their
//   read transaction, never a half-applied replace
// - Dropping an uncommitted rusqlite Transaction rolls it back, so every early
//   return (error or cancellation) leaves the previous state intact

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        Self::open_with_timeout(db_path, DEFAULT_BUSY_TIMEOUT)
    }

    pub fn open_with_timeout(db_path: &Path, busy_timeout: Duration) -> Result<Self> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        conn.busy_timeout(busy_timeout)?;
        let _mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;

        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn init_schema(&self) -> Result<()> {
        schema::init_schema(&self.conn)
    }

    /// Atomically replace every stored row and the summary of `summary.file_name`.
    ///
    /// Deletes the previous rows and summary, inserts `rows` in batches of
    /// `batch_size`, inserts the new summary and commits. Nothing is visible to
    /// readers until the commit; any failure or cancellation rolls back.
    pub fn replace_file(
        &mut self,
        summary: &FileSummary,
        rows: &[ParsedRow],
        batch_size: usize,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let file_name = &summary.file_name;
        let batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let removed_rows = values::delete_for_file(&tx, file_name)?;
        let removed_summary = summaries::delete(&tx, file_name)?;
        debug!(
            file_name = %file_name,
            removed_rows,
            removed_summary,
            "cleared previous import"
        );

        let mut inserted = 0;
        for batch in rows.chunks(batch_size) {
            if cancel.is_cancelled() {
                info!(file_name = %file_name, "replace cancelled, rolling back");
                return Err(Error::Cancelled);
            }
            inserted += values::insert_batch(&tx, file_name, batch)?;
        }

        if inserted != rows.len() {
            return Err(Error::Query(format!(
                "inserted {} of {} rows for '{}'",
                inserted,
                rows.len(),
                file_name
            )));
        }

        summaries::insert(&tx, summary)?;

        if cancel.is_cancelled() {
            info!(file_name = %file_name, "replace cancelled, rolling back");
            return Err(Error::Cancelled);
        }

        tx.commit()?;
        debug!(file_name = %file_name, rows = inserted, "replace committed");

        Ok(())
    }

    /// Filtered, paginated summaries plus the pre-pagination total.
    ///
    /// Count and page are read inside one transaction so both reflect the same
    /// committed state.
    pub fn list_summaries(
        &self,
        filter: &SummaryFilter,
        page: &PageRequest,
    ) -> Result<Page<FileSummary>> {
        let tx = self.conn.unchecked_transaction()?;
        let total = summaries::count(&tx, filter)?;
        let items = summaries::page(&tx, filter, page)?;
        tx.commit()?;

        Ok(Page {
            page: page.page,
            page_size: page.page_size,
            total,
            items,
        })
    }

    pub fn get_summary(&self, file_name: &FileName) -> Result<Option<FileSummary>> {
        summaries::get(&self.conn, file_name)
    }

    /// Up to `limit` rows of a file, newest first. Empty when the file is unknown.
    pub fn latest_values(&self, file_name: &FileName, limit: usize) -> Result<Vec<StoredRow>> {
        values::latest(&self.conn, file_name, limit)
    }

    pub fn count_values(&self, file_name: &FileName) -> Result<u64> {
        values::count_for_file(&self.conn, file_name)
    }
}
