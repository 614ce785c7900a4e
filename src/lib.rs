//! # Complaint Pipeline
//!
//! A batch ingestion and normalization pipeline for municipal
//! service-complaint extracts.
//!
//! The pipeline reads a flat tabular extract, maps its columns onto seven
//! canonical fields, backfills whatever the extract does not carry, and
//! replace-loads the result into a SQLite-backed document collection with
//! the secondary indexes downstream dashboards query against.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌────────────┐   ┌─────────────┐   ┌─────────┐
//! │ Extract  │──▶│ Normalizer │──▶│ Bulk Loader │──▶│ SQLite  │
//! │  (CSV)   │   │ 7 fields   │   │ replace+idx │   │ store   │
//! └──────────┘   └────────────┘   └─────────────┘   └────┬────┘
//!                                                        │
//!                                                        ▼
//!                                                 ┌─────────────┐
//!                                                 │ read access │
//!                                                 │ (dashboard) │
//!                                                 └─────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Canonical record and field mapping |
//! | [`extract`] | Tabular extract reading with row cap |
//! | [`normalize`] | Schema normalization and date canonicalization |
//! | [`load`] | Replace-load and index provisioning |
//! | [`records`] | Read accessor for the presentation layer |
//! | [`db`] | Store connection |
//! | [`migrate`] | Schema setup |
//! | [`error`] | Typed pipeline errors |

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod load;
pub mod migrate;
pub mod models;
pub mod normalize;
pub mod records;
