// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::RawOptions;
use crate::errors::Result;

/// Load raw options from a TOML file.
///
/// This only performs TOML deserialization and applies serde defaults; it
/// does **not** validate values. Use [`crate::config::CompileOptions::resolve`]
/// for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawOptions> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let options: RawOptions = toml::from_str(&contents)?;

    Ok(options)
}

/// Load options for the host driver.
///
/// - An explicitly requested file must exist.
/// - Without an explicit path, [`default_config_path`] is used if present;
///   otherwise built-in defaults apply.
pub fn load_or_default(explicit: Option<&Path>) -> Result<RawOptions> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }

    let path = default_config_path();
    if path.is_file() {
        load_from_path(&path)
    } else {
        debug!(?path, "no config file found; using built-in defaults");
        Ok(RawOptions::default())
    }
}

/// Default config file: `Mjml.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Mjml.toml")
}
