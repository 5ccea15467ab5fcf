// src/config/validate.rs

use std::path::{Path, PathBuf};

use crate::config::model::{CompileOptions, HostConfig, RawOptions};
use crate::errors::{MjmlError, Result};
use crate::resolve::SOURCE_EXTENSION;

impl CompileOptions {
    /// Validate `raw` against the host settings and build the session
    /// configuration.
    ///
    /// - `input` / `output` must be non-empty.
    /// - `views = ""` disables the views re-scan.
    /// - `extension` gets a leading dot if it lacks one.
    /// - Absolute paths below `host.root` are made relative to it, so they
    ///   compare equal to the relative paths the watcher reports.
    pub fn resolve(raw: RawOptions, host: &HostConfig) -> Result<Self> {
        validate_raw_options(&raw)?;

        let input = relativize(&host.root, raw.input.trim());
        let output = relativize(&host.root, raw.output.trim());
        let views = raw
            .views
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| relativize(&host.root, v));
        let extension = normalize_extension(&raw.extension);

        if input == output && extension.trim_start_matches('.') == SOURCE_EXTENSION {
            return Err(MjmlError::ConfigError(format!(
                "output {:?} with extension {:?} would overwrite the sources in {:?}",
                output, extension, input
            )));
        }

        Ok(CompileOptions::new_unchecked(
            input,
            views,
            output,
            extension,
            raw.log,
            raw.watch,
            host.mode.is_build(),
            raw.engine,
            host.logger.clone(),
        ))
    }
}

fn validate_raw_options(raw: &RawOptions) -> Result<()> {
    if raw.input.trim().is_empty() {
        return Err(MjmlError::ConfigError("`input` must not be empty".to_string()));
    }

    if raw.output.trim().is_empty() {
        return Err(MjmlError::ConfigError("`output` must not be empty".to_string()));
    }

    if raw.extension.contains(['/', '\\']) {
        return Err(MjmlError::ConfigError(format!(
            "`extension` must be a file suffix, got {:?}",
            raw.extension
        )));
    }

    Ok(())
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.is_empty() || ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

fn relativize(root: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        if let Ok(rel) = path.strip_prefix(root) {
            return rel.to_path_buf();
        }
    }
    path
}
