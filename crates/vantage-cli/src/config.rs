//! Configuration loading for the CLI.
//!
//! Precedence: an explicit `--config` path wins; otherwise the per-user
//! config file (`vantage/config.toml` under the platform config directory)
//! is used when it exists; otherwise built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::debug;

use vantage::config::AppConfig;

use crate::error::CliError;

/// Loads the pipeline configuration.
///
/// # Errors
///
/// Returns [`CliError::ConfigRead`] / [`CliError::ConfigParse`] when a config
/// file is present but unusable. A missing default config file is not an
/// error.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<AppConfig, CliError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|path| path.exists()),
    };

    let Some(path) = path else {
        debug!("No configuration file, using defaults");
        return Ok(AppConfig::default());
    };

    debug!(path = path.display().to_string(); "Loading configuration");
    let text = fs::read_to_string(&path).map_err(|source| CliError::ConfigRead {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| CliError::ConfigParse { path, source })
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "vantage").map(|dirs| dirs.config_dir().join("config.toml"))
}
