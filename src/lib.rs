// src/lib.rs

pub mod cli;
pub mod compiler;
pub mod config;
pub mod controller;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod resolve;
pub mod template;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_or_default, CompileOptions, HostConfig};
use crate::controller::{MjmlPlugin, RuntimeEvent};
use crate::fs::RealFileSystem;
use crate::logging::{ConsoleLogger, Logger, TracingLogger};
use crate::resolve::{collect_source_files, to_output_path, Location};
use crate::types::CommandMode;

/// High-level entry point used by `main.rs`.
///
/// Plays the host build tool:
/// - loads the options and resolves them against the command mode
/// - `build`: runs the full pass and fails on the first error
/// - `serve`: starts the watch runtime plus the file watcher, and stops on
///   Ctrl-C
pub async fn run(args: CliArgs) -> Result<()> {
    let mode = args.command.mode();
    let raw = load_or_default(args.config.as_deref().map(Path::new))?;

    let logger: Arc<dyn Logger> = match mode {
        CommandMode::Build => Arc::new(ConsoleLogger),
        CommandMode::Serve => Arc::new(TracingLogger),
    };
    let host = HostConfig {
        mode,
        root: project_root(),
        logger,
    };

    let mut plugin = MjmlPlugin::new(raw);
    plugin.config_resolved(&host)?;

    if args.dry_run {
        if let Some(options) = plugin.options() {
            print_dry_run(options)?;
        }
        return Ok(());
    }

    match mode {
        CommandMode::Build => {
            let summary = plugin.build_end()?;
            info!(compiled = summary.compiled, "build finished");
            Ok(())
        }
        CommandMode::Serve => serve(plugin, host.root).await,
    }
}

async fn serve(mut plugin: MjmlPlugin, root: PathBuf) -> Result<()> {
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let runtime = match plugin.configure_server(rt_rx, rt_tx.clone())? {
        Some(runtime) => runtime,
        None => {
            info!("watching disabled; nothing to do");
            return Ok(());
        }
    };

    let _watcher_handle = crate::watch::spawn_watcher(root, rt_tx.clone())?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    runtime.run().await?;
    Ok(())
}

/// Project root: the current working directory, which is also the base of
/// every relative path in the config.
fn project_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Dry-run output: resolved options and the source -> output mapping.
fn print_dry_run(options: &CompileOptions) -> Result<()> {
    println!("mjmlwatch dry-run");
    println!("  input = {}", options.input().display());
    match options.views() {
        Some(views) => println!("  views = {}", views.display()),
        None => println!("  views = (disabled)"),
    }
    println!("  output = {}", options.output().display());
    println!("  extension = {}", options.extension());
    println!("  building = {}", options.is_building());
    println!("  watch = {}", options.watch_enabled());
    match &options.engine_options().include_root {
        Some(root) => println!("  mjml.include_root = {root}"),
        None => println!("  mjml.include_root = (template directory)"),
    }
    println!();

    let location = Location::from_path(options.input());
    let files = collect_source_files(&RealFileSystem, &location)?;

    println!("files ({}):", files.len());
    for file in &files {
        println!("  {} -> {}", file.display(), to_output_path(file, options).display());
    }

    debug!("dry-run complete (nothing compiled)");
    Ok(())
}
