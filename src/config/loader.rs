// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{ConfigFile, ConfigOverrides, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for
/// the semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file, apply CLI overrides and validate.
pub fn load_and_validate(
    path: impl AsRef<Path>,
    overrides: &ConfigOverrides,
) -> Result<ConfigFile> {
    let mut raw = load_from_path(&path)?;
    raw.apply_overrides(overrides);
    ConfigFile::try_from(raw)
}

/// Like [`load_and_validate`], but starts from built-in defaults when no
/// path is given.
pub fn load_or_default(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ConfigFile> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            load_and_validate(path, overrides)
        }
        None => {
            debug!("no config file given; using defaults");
            let mut raw = RawConfigFile::default();
            raw.apply_overrides(overrides);
            ConfigFile::try_from(raw)
        }
    }
}
