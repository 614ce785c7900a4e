//! Bulk replace-load into the document store.
//!
//! Replaces the collection's contents with a new generation of records and
//! ensures the secondary indexes exist. Replacement is clear-then-insert
//! with no wrapping transaction; readers during a load may observe an empty
//! or partially-populated collection.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::config::Config;
use crate::db;
use crate::error::PipelineError;
use crate::migrate;
use crate::models::{ComplaintRecord, LoadReport, COLLECTION};

/// Replace the collection's contents with `records` and ensure indexes.
///
/// The store connection is acquired once and released on every exit path.
/// Insertion is unordered: a rejected record is logged and counted but does
/// not block the remaining records, and nothing already written is rolled
/// back. A batch where the store accepted nothing is a catastrophic
/// [`PipelineError::Operation`].
pub async fn replace_load(
    config: &Config,
    records: &[ComplaintRecord],
) -> Result<LoadReport, PipelineError> {
    let pool = db::connect(config).await?;
    let result = run(&pool, records).await;
    pool.close().await;
    info!("store connection closed");
    result
}

async fn run(pool: &SqlitePool, records: &[ComplaintRecord]) -> Result<LoadReport, PipelineError> {
    migrate::ensure_collection(pool).await?;

    // Clearing an already-empty collection is a no-op, not an error.
    sqlx::query("DELETE FROM complaints")
        .execute(pool)
        .await
        .map_err(PipelineError::Operation)?;
    info!("cleared previous generation of {}", COLLECTION);

    let mut inserted = 0u64;
    let mut rejected = 0u64;
    let mut last_err: Option<sqlx::Error> = None;

    for record in records {
        let result = sqlx::query(
            r#"
            INSERT INTO complaints
                (created_date, complaint_type, incident_zip, borough, descriptor, status, closed_date)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.created_date)
        .bind(&record.complaint_type)
        .bind(&record.incident_zip)
        .bind(&record.borough)
        .bind(&record.descriptor)
        .bind(&record.status)
        .bind(&record.closed_date)
        .execute(pool)
        .await;

        match result {
            Ok(_) => inserted += 1,
            Err(e) => {
                warn!("record rejected by store: {}", e);
                rejected += 1;
                last_err = Some(e);
            }
        }
    }

    // Whole batch rejected: surface the store failure instead of a report.
    if inserted == 0 {
        if let Some(e) = last_err {
            return Err(PipelineError::Operation(e));
        }
    }
    info!("inserted {} records into {}", inserted, COLLECTION);

    migrate::ensure_indexes(pool).await?;

    Ok(LoadReport { inserted, rejected })
}
