use timescale_index::Database;
use timescale_types::{FileName, LATEST_VALUES_LIMIT, LatestValue};
use tracing::debug;

use crate::{Error, Result};

/// Up to ten most recent values of a file, newest first.
///
/// A file with no stored rows is reported as not found.
pub fn latest_values(db: &Database, file_name: &str) -> Result<Vec<LatestValue>> {
    if file_name.trim().is_empty() {
        return Err(Error::InvalidRequest("fileName is required.".to_string()));
    }

    let name = FileName::from(file_name);
    let rows = db.latest_values(&name, LATEST_VALUES_LIMIT)?;
    if rows.is_empty() {
        return Err(Error::NotFound(format!("File '{}' not found.", name)));
    }

    debug!(file_name = %name, rows = rows.len(), "latest values read");
    Ok(rows.into_iter().map(LatestValue::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::ops::import;
    use std::io::Cursor;
    use timescale_types::CancellationToken;

    fn store(db: &mut Database, name: &str, rows: usize) -> Result<()> {
        let content: String = (0..rows)
            .map(|i| format!("2024-01-01T00:{:02}:00Z;0.5;{}\n", i, i))
            .collect();
        import(
            db,
            name,
            Cursor::new(content.into_bytes()),
            1000,
            &CancellationToken::new(),
        )?;
        Ok(())
    }

    #[test]
    fn test_newest_first_and_capped() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        store(&mut db, "v.csv", 15)?;

        let values = latest_values(&db, "v.csv")?;
        assert_eq!(values.len(), 10);
        assert_eq!(values[0].value, 14.0);
        assert_eq!(values[9].value, 5.0);
        assert!(values.windows(2).all(|w| w[0].date >= w[1].date));
        Ok(())
    }

    #[test]
    fn test_fewer_rows_than_limit() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        store(&mut db, "short.csv", 3)?;
        assert_eq!(latest_values(&db, "short.csv")?.len(), 3);
        Ok(())
    }

    #[test]
    fn test_unknown_file_is_not_found() -> Result<()> {
        let db = Database::open_in_memory()?;
        let err = latest_values(&db, "missing.csv").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_problem().detail, "File 'missing.csv' not found.");
        Ok(())
    }

    #[test]
    fn test_blank_name_is_rejected() -> Result<()> {
        let db = Database::open_in_memory()?;
        let err = latest_values(&db, " ").unwrap_err();

        assert_eq!(err.status(), 400);
        assert_eq!(err.to_problem().detail, "fileName is required.");
        Ok(())
    }

    #[test]
    fn test_lookup_is_exact_match() -> Result<()> {
        let mut db = Database::open_in_memory()?;
        store(&mut db, "Data.csv", 2)?;
        assert!(latest_values(&db, "data.csv").is_err());
        Ok(())
    }
}
