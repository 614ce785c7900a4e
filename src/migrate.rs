use sqlx::SqlitePool;
use tracing::info;

use crate::config::Config;
use crate::db;
use crate::error::PipelineError;
use crate::models::COLLECTION;

/// Create the collection and its secondary indexes. Idempotent.
pub async fn run_migrations(config: &Config) -> Result<(), PipelineError> {
    let pool = db::connect(config).await?;
    let result = apply(&pool).await;
    pool.close().await;
    info!("store connection closed");
    result
}

async fn apply(pool: &SqlitePool) -> Result<(), PipelineError> {
    ensure_collection(pool).await?;
    ensure_indexes(pool).await?;
    Ok(())
}

/// Create the complaints collection if it does not exist.
///
/// The rowid is the storage-assigned identity and is excluded from the
/// read accessor's shape. Date columns are `YYYY-MM-DD` text or NULL;
/// everything else is sentinel-backed text, so all seven canonical fields
/// are always present on every document.
pub(crate) async fn ensure_collection(pool: &SqlitePool) -> Result<(), PipelineError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS complaints (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_date TEXT,
            complaint_type TEXT NOT NULL,
            incident_zip TEXT NOT NULL,
            borough TEXT NOT NULL,
            descriptor TEXT NOT NULL,
            status TEXT NOT NULL,
            closed_date TEXT
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(PipelineError::Operation)?;

    Ok(())
}

/// Provision the secondary indexes the dashboard's access patterns need:
/// postal-code lookups, complaint-category lookups, and date+postal-code
/// range scans. `IF NOT EXISTS` makes re-runs a no-op.
pub(crate) async fn ensure_indexes(pool: &SqlitePool) -> Result<(), PipelineError> {
    let statements = [
        "CREATE INDEX IF NOT EXISTS idx_complaints_incident_zip ON complaints(incident_zip)",
        "CREATE INDEX IF NOT EXISTS idx_complaints_complaint_type ON complaints(complaint_type)",
        "CREATE INDEX IF NOT EXISTS idx_complaints_created_zip \
         ON complaints(created_date ASC, incident_zip ASC)",
    ];

    for stmt in statements {
        sqlx::query(stmt)
            .execute(pool)
            .await
            .map_err(PipelineError::Operation)?;
    }

    info!("indexes ensured on {}", COLLECTION);
    Ok(())
}
