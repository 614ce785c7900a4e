//! Read accessor for the presentation layer.
//!
//! Returns the full current collection contents in insertion order with the
//! storage-assigned identity column excluded. Any further filtering or
//! projection belongs to the consumer, not this pipeline.

use anyhow::Result;
use sqlx::{Row, SqlitePool};

use crate::config::Config;
use crate::db;
use crate::error::PipelineError;
use crate::migrate;
use crate::models::ComplaintRecord;

/// Fetch every record of the current generation.
pub async fn fetch_all(config: &Config) -> Result<Vec<ComplaintRecord>, PipelineError> {
    let pool = db::connect(config).await?;
    let result = fetch_rows(&pool).await;
    pool.close().await;
    result
}

async fn fetch_rows(pool: &SqlitePool) -> Result<Vec<ComplaintRecord>, PipelineError> {
    migrate::ensure_collection(pool).await?;

    // The identity column stays out of the selected shape.
    let rows = sqlx::query(
        "SELECT created_date, complaint_type, incident_zip, borough, descriptor, status, closed_date \
         FROM complaints ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await
    .map_err(PipelineError::Operation)?;

    Ok(rows
        .iter()
        .map(|row| ComplaintRecord {
            created_date: row.get("created_date"),
            complaint_type: row.get("complaint_type"),
            incident_zip: row.get("incident_zip"),
            borough: row.get("borough"),
            descriptor: row.get("descriptor"),
            status: row.get("status"),
            closed_date: row.get("closed_date"),
        })
        .collect())
}

/// CLI entry point — prints one JSON document per line.
pub async fn run_records(config: &Config) -> Result<()> {
    let records = fetch_all(config).await?;
    for record in &records {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}
