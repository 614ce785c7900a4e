//! Tabular extract reading.
//!
//! Reads the source CSV into a header row plus raw text cells, stopping at
//! the configured row cap. Nothing here knows about canonical fields; the
//! extract is handed to [`crate::normalize`] as-is and dropped afterwards.

use std::path::Path;

use crate::error::PipelineError;

/// An extract held in memory: the header row and up to `row_cap` raw rows.
///
/// Rows are kept exactly as read — ragged rows are not padded, so a cell
/// missing from a short row shows up as a missing value downstream.
#[derive(Debug, Clone)]
pub struct Extract {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Extract {
    /// Index of a source column in the header, by exact name match.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Read at most `row_cap` rows from the extract at `path`.
///
/// A malformed extract (unreadable file, broken CSV framing) is fatal and
/// returns [`PipelineError::ExtractRead`] before any store interaction.
/// Rows with varying column counts are tolerated.
pub fn read_extract(path: &Path, row_cap: usize) -> Result<Extract, PipelineError> {
    let extract_err = |source: csv::Error| PipelineError::ExtractRead {
        path: path.display().to_string(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(extract_err)?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(extract_err)?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records().take(row_cap) {
        let record = result.map_err(extract_err)?;
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(Extract { headers, rows })
}
