use std::io::BufRead;
use std::path::{Path, PathBuf};
use timescale_index::Database;
use timescale_types::{
    CancellationToken, FileSummary, ImportOutcome, LatestValue, Page, ResultsQuery,
};
use tracing::debug;

use crate::config::Config;
use crate::ops;
use crate::Result;

/// An opened data directory: its configuration and its database.
pub struct Timescale {
    db: Database,
    db_path: PathBuf,
    config: Config,
}

impl Timescale {
    /// Open `data_dir`, loading `config.toml` if present and creating the
    /// database on first use.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;
        Self::open_with_config(data_dir, config)
    }

    pub fn open_with_config(data_dir: &Path, config: Config) -> Result<Self> {
        config.validate()?;

        let db_path = config.database_path(data_dir);
        let db = Database::open_with_timeout(&db_path, config.busy_timeout())?;
        debug!(path = %db_path.display(), "database opened");

        Ok(Self {
            db,
            db_path,
            config,
        })
    }

    pub fn import<R: BufRead>(
        &mut self,
        file_name: &str,
        reader: R,
        cancel: &CancellationToken,
    ) -> Result<ImportOutcome> {
        let batch_size = self.config.import.batch_size;
        ops::import(&mut self.db, file_name, reader, batch_size, cancel)
    }

    pub fn results(&self, query: &ResultsQuery) -> Result<Page<FileSummary>> {
        ops::results(&self.db, query, self.config.query.default_page_size)
    }

    pub fn latest_values(&self, file_name: &str) -> Result<Vec<LatestValue>> {
        ops::latest_values(&self.db, file_name)
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }
}
