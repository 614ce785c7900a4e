//! Core data types that flow through the ingestion pipeline.

use serde::{Deserialize, Serialize};

/// Placeholder stored for missing non-date text values.
pub const SENTINEL: &str = "UNKNOWN";

/// Name of the collection holding the current generation of records.
pub const COLLECTION: &str = "complaints";

/// Fixed mapping of canonical field name to its expected source column.
/// Lookup is by exact name match against the extract header.
pub const SOURCE_COLUMNS: [(&str, &str); 7] = [
    ("created_date", "Created_date"),
    ("complaint_type", "Complaint_type"),
    ("incident_zip", "Incident_zip"),
    ("borough", "Borough"),
    ("descriptor", "Descriptor"),
    ("status", "Status"),
    ("closed_date", "Closed_Date"),
];

/// A normalized complaint document as persisted in the collection.
///
/// All seven fields are always present. Non-date fields are trimmed text
/// (or [`SENTINEL`]); the two date fields are `YYYY-MM-DD` text or `None`
/// when the source value did not parse as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub created_date: Option<String>,
    pub complaint_type: String,
    pub incident_zip: String,
    pub borough: String,
    pub descriptor: String,
    pub status: String,
    pub closed_date: Option<String>,
}

/// Outcome of one replace-load cycle.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Records the store accepted.
    pub inserted: u64,
    /// Records the store rejected (not retried, not rolled back).
    pub rejected: u64,
}
