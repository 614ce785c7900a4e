use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::config::Config;
use crate::error::PipelineError;

/// Acquire a scoped connection pool to the document store.
///
/// Fails with [`PipelineError::Connection`] before any mutation when the
/// store is unreachable. The caller owns the pool and must close it on
/// every exit path.
pub async fn connect(config: &Config) -> Result<SqlitePool, PipelineError> {
    let db_path = &config.db.path;

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| PipelineError::Connection(sqlx::Error::Io(e)))?;
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))
        .map_err(PipelineError::Connection)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(PipelineError::Connection)?;

    Ok(pool)
}
