//! Subcommands of the `covered` binary.

pub mod batch;
pub mod config;
pub mod process;
pub mod serve;

use std::path::{Path, PathBuf};

use covered_core::models::config::CoveredConfig;
use tracing::debug;

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("covered")
        .join("config.json")
}

/// Resolve configuration once: explicit file, else default file if present,
/// else defaults; environment variables override either.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CoveredConfig> {
    let config = match config_path {
        Some(path) => CoveredConfig::from_file(Path::new(path))?,
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                debug!("Loading config from {}", default_path.display());
                CoveredConfig::from_file(&default_path)?
            } else {
                CoveredConfig::default()
            }
        }
    };

    Ok(config.with_env())
}
