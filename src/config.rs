use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub extract: ExtractConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExtractConfig {
    /// Path to the tabular extract file.
    pub path: PathBuf,
    /// Maximum number of rows read from the extract. Rows beyond the cap
    /// are never read.
    #[serde(default = "default_row_cap")]
    pub row_cap: usize,
}

fn default_row_cap() -> usize {
    100_000
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.extract.row_cap == 0 {
        anyhow::bail!("extract.row_cap must be > 0");
    }

    Ok(config)
}
