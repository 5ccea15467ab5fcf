// src/logging.rs

//! Logging setup for `mjmlwatch` using `tracing` + `tracing-subscriber`,
//! plus the [`Logger`] handle the host passes to the plugin.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `MJMLWATCH_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Diagnostics go to STDERR. Compile summaries of a one-shot build are
//! printed to STDOUT by [`ConsoleLogger`].

use std::fmt::Debug;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => std::env::var("MJMLWATCH_LOG")
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(tracing::Level::INFO),
    };

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}

/// User-facing logger handle carried by the resolved configuration.
///
/// The compiler reports per-file summaries and development-mode failures
/// through this handle instead of writing to a global sink, so tests can
/// capture exactly what a user would see.
pub trait Logger: Send + Sync + Debug {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Development-session logger: forwards to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "mjml", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "mjml", "{message}");
    }
}

/// One-shot build logger: plain lines on stdout, prefixed with `mjml - `.
#[derive(Debug, Clone, Default)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn info(&self, message: &str) {
        println!("mjml - {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("mjml - {message}");
    }
}
