// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MjmlError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The templating engine rejected a source file.
    #[error("could not compile {}: {message}", path.display())]
    Compile { path: PathBuf, message: String },

    /// A lifecycle hook was called before the configuration was resolved.
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MjmlError {
    /// True for errors raised by the templating engine itself, as opposed to
    /// filesystem or configuration failures.
    pub fn is_compile_error(&self) -> bool {
        matches!(self, MjmlError::Compile { .. })
    }
}

pub type Result<T> = std::result::Result<T, MjmlError>;
