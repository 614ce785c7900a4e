//! Schema normalization.
//!
//! Maps source columns to the seven canonical fields, backfills columns the
//! extract does not carry, coerces every value to trimmed text with the
//! `"UNKNOWN"` sentinel for missing cells, and canonicalizes the two date
//! fields to `YYYY-MM-DD` or an explicit null. Rows are never dropped and
//! input order is preserved.

use chrono::{NaiveDate, NaiveDateTime};

use crate::extract::Extract;
use crate::models::{ComplaintRecord, SENTINEL, SOURCE_COLUMNS};

/// Accepted datetime representations, tried in order before the date-only
/// forms. The first match wins, which keeps parse behavior deterministic.
const DATETIME_FORMATS: [&str; 4] = [
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Accepted date-only representations, tried after [`DATETIME_FORMATS`].
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Positions of the seven canonical fields' source columns in one extract.
///
/// `None` means the source column is absent from the header entirely, so the
/// field is backfilled with the sentinel for every row rather than decided
/// per row.
struct ColumnPlan {
    indices: [Option<usize>; 7],
}

impl ColumnPlan {
    fn for_extract(extract: &Extract) -> Self {
        let mut indices = [None; 7];
        for (slot, (_, source)) in indices.iter_mut().zip(SOURCE_COLUMNS) {
            *slot = extract.column_index(source);
        }
        Self { indices }
    }
}

/// Normalize an extract into canonical complaint records, one per input row.
pub fn normalize_extract(extract: &Extract) -> Vec<ComplaintRecord> {
    let plan = ColumnPlan::for_extract(extract);
    extract
        .rows
        .iter()
        .map(|row| normalize_row(row, &plan))
        .collect()
}

/// Canonical field names whose source column is missing from the extract.
pub fn missing_columns(extract: &Extract) -> Vec<&'static str> {
    SOURCE_COLUMNS
        .iter()
        .filter(|&&(_, source)| extract.column_index(source).is_none())
        .map(|&(canonical, _)| canonical)
        .collect()
}

fn normalize_row(row: &[String], plan: &ColumnPlan) -> ComplaintRecord {
    let cell = |i: usize| plan.indices[i].and_then(|col| row.get(col)).map(String::as_str);

    // Index positions follow SOURCE_COLUMNS order.
    ComplaintRecord {
        created_date: date_value(cell(0)),
        complaint_type: text_value(cell(1)),
        incident_zip: text_value(cell(2)),
        borough: text_value(cell(3)),
        descriptor: text_value(cell(4)),
        status: text_value(cell(5)),
        closed_date: date_value(cell(6)),
    }
}

/// Coerce a raw non-date cell to trimmed text, substituting the sentinel
/// for missing values. An empty cell counts as missing; a cell of only
/// whitespace is text that trims to empty, matching the original extract
/// semantics where blanks arrive as true nulls.
fn text_value(raw: Option<&str>) -> String {
    match raw {
        None => SENTINEL.to_string(),
        Some("") => SENTINEL.to_string(),
        Some(v) => v.trim().to_string(),
    }
}

/// Canonicalize a raw date cell to `YYYY-MM-DD`, or `None` when the value
/// is missing or does not parse. Dates never take the text sentinel.
fn date_value(raw: Option<&str>) -> Option<String> {
    parse_date(raw?.trim()).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Permissive calendar-date parse against the ordered format lists.
fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d);
        }
    }
    None
}
