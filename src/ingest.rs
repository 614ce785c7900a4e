//! Ingestion pipeline orchestration.
//!
//! Coordinates the full load flow: extract → schema normalization →
//! replace-load → index provisioning. The extract is read and normalized
//! before any store interaction, so a malformed extract never mutates the
//! collection.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::Config;
use crate::extract;
use crate::load;
use crate::normalize;

pub async fn run_load(
    config: &Config,
    extract_path: Option<PathBuf>,
    limit: Option<usize>,
    dry_run: bool,
) -> Result<()> {
    let path = extract_path.unwrap_or_else(|| config.extract.path.clone());
    let row_cap = limit.unwrap_or(config.extract.row_cap);

    let extract = extract::read_extract(&path, row_cap)?;
    let backfilled = normalize::missing_columns(&extract);
    let records = normalize::normalize_extract(&extract);

    if dry_run {
        println!("load {} (dry-run)", path.display());
        println!("  rows read: {}", extract.rows.len());
        println!("  records normalized: {}", records.len());
        if !backfilled.is_empty() {
            println!("  backfilled columns: {}", backfilled.join(", "));
        }
        return Ok(());
    }

    let report = load::replace_load(config, &records).await?;

    println!("load {}", path.display());
    println!("  rows read: {}", extract.rows.len());
    if !backfilled.is_empty() {
        println!("  backfilled columns: {}", backfilled.join(", "));
    }
    println!("  records inserted: {}", report.inserted);
    if report.rejected > 0 {
        println!("  records rejected: {}", report.rejected);
    }
    println!("ok");

    Ok(())
}
