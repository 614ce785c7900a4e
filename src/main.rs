//! # Complaint Pipeline CLI (`c311`)
//!
//! The `c311` binary drives the ingestion pipeline: schema setup, extract
//! loading, and a read accessor for the presentation layer.
//!
//! ## Usage
//!
//! ```bash
//! c311 --config ./config/c311.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `c311 init` | Create the store schema and secondary indexes |
//! | `c311 load` | Normalize the extract and replace-load the collection |
//! | `c311 records` | Print all current records as JSON lines |

mod config;
mod db;
mod error;
mod extract;
mod ingest;
mod load;
mod migrate;
mod models;
mod normalize;
mod records;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Complaint Pipeline CLI — batch ingestion of municipal service-complaint
/// extracts into a queryable document collection.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/c311.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "c311",
    about = "Complaint Pipeline — normalize and load service-complaint extracts",
    version,
    long_about = "Complaint Pipeline reads a tabular service-complaint extract, normalizes it \
    onto seven canonical fields (backfilling missing columns and canonicalizing dates), and \
    replace-loads the result into a SQLite-backed collection with the secondary indexes the \
    downstream dashboard queries against."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/c311.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the store schema.
    ///
    /// Creates the SQLite database file, the complaints collection, and the
    /// three secondary indexes. Idempotent — running it multiple times is
    /// safe.
    Init,

    /// Run the ingestion pipeline.
    ///
    /// Reads the extract (up to the row cap), normalizes every row onto the
    /// seven canonical fields, replaces the collection's contents, and
    /// ensures the secondary indexes. The previous generation is destroyed.
    Load {
        /// Extract file to read instead of the configured `extract.path`.
        #[arg(long)]
        extract: Option<PathBuf>,

        /// Maximum number of rows to read, overriding `extract.row_cap`.
        #[arg(long)]
        limit: Option<usize>,

        /// Read and normalize only — report counts without touching the store.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print every current record as one JSON object per line.
    ///
    /// The storage-assigned identity field is excluded; exactly the seven
    /// canonical fields appear. Filtering is the consumer's concern.
    Records,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Store initialized successfully.");
        }
        Commands::Load {
            extract,
            limit,
            dry_run,
        } => {
            ingest::run_load(&cfg, extract, limit, dry_run).await?;
        }
        Commands::Records => {
            records::run_records(&cfg).await?;
        }
    }

    Ok(())
}
