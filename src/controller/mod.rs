// src/controller/mod.rs

//! Recompilation controller.
//!
//! This module ties together:
//! - the plugin lifecycle hooks the host calls ([`plugin`]);
//! - the per-location re-scan queue ([`queue`]);
//! - the runtime event loop that reacts to:
//!   - file add / change / unlink notifications
//!   - re-scan completion reports
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`] and performs the actual work through a
//! [`backend::CompileBackend`].

use std::path::PathBuf;

use crate::resolve::Location;
use crate::types::FileEventKind;

/// Events flowing into the runtime from the watcher and the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// A file was added, changed or removed. `path` is relative to the
    /// project root when the watcher could relativize it.
    FileChanged { kind: FileEventKind, path: PathBuf },
    /// A background pass over `location` has finished.
    RescanFinished { location: Location },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Work the core asks the IO shell to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadCommand {
    /// Compile exactly this source file, before handling the next event.
    CompileFile(PathBuf),
    /// Start a background pass over every source file of a location.
    Rescan(Location),
    /// Nothing is in flight any more and shutdown was requested.
    RequestExit,
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    pub commands: Vec<ReloadCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn idle() -> Self {
        Self {
            commands: Vec::new(),
            keep_running: true,
        }
    }
}

pub mod backend;
pub mod core;
pub mod plugin;
pub mod queue;
pub mod runtime;

pub use backend::{CompileBackend, CompilerBackend};
pub use self::core::ReloadCore;
pub use plugin::{ControllerState, MjmlPlugin};
pub use queue::RescanQueue;
pub use runtime::Runtime;
