// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The binary plays the part of the host build tool: `build` and `serve`
//! fire the plugin's lifecycle hooks in the order a build tool would.

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::CommandMode;

/// Command-line arguments for `mjmlwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mjmlwatch",
    version,
    about = "Compile MJML templates to HTML, once or on every change.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Mjml.toml` in the current working directory. Built-in
    /// defaults are used when that file does not exist.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MJMLWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Resolve config and print the source -> output mapping without
    /// compiling anything.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Command {
    /// One-shot production build: compile every template, fail on the first error.
    Build,
    /// Development session: recompile templates as they change.
    Serve,
}

impl Command {
    pub fn mode(self) -> CommandMode {
        match self {
            Command::Build => CommandMode::Build,
            Command::Serve => CommandMode::Serve,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
