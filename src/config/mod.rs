// src/config/mod.rs

//! Configuration loading and validation for mjmlwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed option model and the resolved session
//!   configuration (`model.rs`).
//! - Load options from disk (`loader.rs`).
//! - Validate and resolve them against the host settings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_from_path, load_or_default};
pub use model::{CompileOptions, HostConfig, RawOptions};
