// src/core/paths.rs

use crate::constants::{CONFIG_DIR_NAME, DEFINITIONS_FILENAME};
use anyhow::{Result, anyhow};
use lazy_static::lazy_static;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

lazy_static! {
    static ref TANDEM_CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Could not create config directory at '{path}': {source}")]
    ConfigDirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Returns the path to the tandem configuration directory (`~/.config/tandem`).
/// Creates it if it doesn't exist.
///
/// This function is memoized: the first call computes and caches the path,
/// subsequent calls return the cached value instantly.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    let mut cached_path_guard = TANDEM_CONFIG_DIR.lock().unwrap();

    if let Some(path) = &*cached_path_guard {
        return Ok(path.clone());
    }

    let config_path = dirs::config_dir()
        .ok_or(PathError::ConfigDirNotFound)?
        .join(CONFIG_DIR_NAME);

    if !config_path.exists() {
        fs::create_dir_all(&config_path).map_err(|e| PathError::ConfigDirCreation {
            path: config_path.display().to_string(),
            source: e,
        })?;
    }

    *cached_path_guard = Some(config_path.clone());

    Ok(config_path)
}

/// Resolves which definitions file to read when none was named on the
/// command line: `./tandem.toml` if the working directory has one,
/// otherwise `tandem.toml` inside the config directory.
pub fn default_definitions_file() -> Result<PathBuf> {
    let local = PathBuf::from(DEFINITIONS_FILENAME);
    if local.exists() {
        return Ok(local);
    }
    Ok(get_config_dir()?.join(DEFINITIONS_FILENAME))
}

/// Expands a user-supplied path argument, resolving the home directory (`~`)
/// and environment variables (`$VAR` or `%VAR%`).
pub fn expand_user_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| anyhow!("Failed to expand path '{}': {}", raw, e))?;
    Ok(PathBuf::from(expanded.into_owned()))
}
