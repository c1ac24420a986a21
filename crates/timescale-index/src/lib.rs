// SQLite store
// Owns imported rows and one summary per file name

mod db;
mod error;
mod queries;
mod schema;

// Public API
pub use db::{DEFAULT_BATCH_SIZE, DEFAULT_BUSY_TIMEOUT, Database, MAX_BATCH_SIZE};
pub use error::{Error, Result};
pub use schema::SCHEMA_VERSION;
