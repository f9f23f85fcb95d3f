// src/config/io.rs
use std::fs;
use std::path::Path;

use super::types::Config;
use crate::error::{RefnetError, Result};

pub const CONFIG_FILE: &str = "refnet.toml";

/// Reads and parses a config file.
///
/// # Errors
/// Returns `RefnetError::Io` if the file cannot be read and
/// `RefnetError::Config` if it is not valid TOML for this schema.
pub fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|source| RefnetError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    parse_config(&content, path)
}

/// # Errors
/// Returns `RefnetError::Config` on TOML or schema errors.
pub fn parse_config(content: &str, path: &Path) -> Result<Config> {
    toml::from_str(content).map_err(|source| RefnetError::Config {
        source,
        path: path.to_path_buf(),
    })
}

/// Loads `refnet.toml` from the working directory, keeping defaults when it
/// is absent or malformed.
pub fn load_local(config: &mut Config) {
    let path = Path::new(CONFIG_FILE);
    if !path.exists() {
        return;
    }
    match read_config(path) {
        Ok(loaded) => {
            tracing::debug!(path = %path.display(), "loaded local config");
            config.network = loaded.network;
            config.display = loaded.display;
        }
        Err(e) => tracing::warn!(path = %path.display(), "ignoring {CONFIG_FILE}: {e}"),
    }
}
