// src/controller/core.rs

//! Pure core of the watch session.
//!
//! [`ReloadCore`] consumes [`RuntimeEvent`]s and returns the
//! [`ReloadCommand`]s the IO shell should perform. It owns the per-location
//! re-scan queue and the shutdown flag, and does no IO itself, so every
//! decision can be unit tested without Tokio, channels or a filesystem.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::CompileOptions;
use crate::controller::queue::RescanQueue;
use crate::controller::{CoreStep, ReloadCommand, RuntimeEvent};
use crate::resolve::{is_source_file, is_under, Location};
use crate::types::FileEventKind;

#[derive(Debug)]
pub struct ReloadCore {
    input: PathBuf,
    views: Option<Location>,
    queue: RescanQueue,
    shutting_down: bool,
}

impl ReloadCore {
    pub fn new(input: impl Into<PathBuf>, views: Option<Location>) -> Self {
        Self {
            input: input.into(),
            views,
            queue: RescanQueue::new(),
            shutting_down: false,
        }
    }

    pub fn from_options(options: &CompileOptions) -> Self {
        Self::new(options.input(), options.views().map(Location::from_path))
    }

    /// Whether an event for `path` should be processed at all: the path must
    /// lie under `input` and carry the source extension.
    pub fn qualifies(&self, path: &Path) -> bool {
        is_under(path, &self.input) && is_source_file(path)
    }

    /// True if no re-scan is running or queued (for tests).
    pub fn is_idle(&self) -> bool {
        self.queue.is_idle()
    }

    pub fn queue(&self) -> &RescanQueue {
        &self.queue
    }

    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::FileChanged { kind, path } => self.on_file_changed(kind, path),
            RuntimeEvent::RescanFinished { location } => self.on_rescan_finished(location),
            RuntimeEvent::ShutdownRequested => self.on_shutdown(),
        }
    }

    fn on_file_changed(&mut self, kind: FileEventKind, path: PathBuf) -> CoreStep {
        if self.shutting_down {
            debug!(%kind, ?path, "shutting down; ignoring file event");
            return CoreStep::idle();
        }

        if !self.qualifies(&path) {
            debug!(%kind, ?path, "not a source file under input; ignoring");
            return CoreStep::idle();
        }

        let mut commands = Vec::new();

        // A removed file cannot be compiled; its stale output is left alone,
        // but views may depend on it, so they are still re-scanned.
        if kind != FileEventKind::Unlink {
            commands.push(ReloadCommand::CompileFile(path));
        }

        if let Some(views) = &self.views {
            if self.queue.request(views) {
                commands.push(ReloadCommand::Rescan(views.clone()));
            }
        }

        CoreStep {
            commands,
            keep_running: true,
        }
    }

    fn on_rescan_finished(&mut self, location: Location) -> CoreStep {
        let follow_up = self.queue.finish(&location);

        if self.shutting_down {
            return self.exit_if_idle();
        }

        let mut step = CoreStep::idle();
        if follow_up {
            step.commands.push(ReloadCommand::Rescan(location));
        }
        step
    }

    fn on_shutdown(&mut self) -> CoreStep {
        self.shutting_down = true;
        self.queue.clear_pending();
        self.exit_if_idle()
    }

    fn exit_if_idle(&self) -> CoreStep {
        if self.queue.is_idle() {
            CoreStep {
                commands: vec![ReloadCommand::RequestExit],
                keep_running: false,
            }
        } else {
            debug!("waiting for in-flight passes before exiting");
            CoreStep::idle()
        }
    }
}
