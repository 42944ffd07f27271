//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use clearance_core::models::config::ClearanceConfig;

/// Platform config file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("clearance")
        .join("config.json")
}

/// Config file in effect: the `--config` flag, else the platform default.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration once at startup.
///
/// An explicit path must exist; the platform default is optional.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<ClearanceConfig> {
    if let Some(path) = explicit {
        debug!("Loading config from {}", path);
        return Ok(ClearanceConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(ClearanceConfig::from_file(&path)?)
    } else {
        Ok(ClearanceConfig::default())
    }
}
