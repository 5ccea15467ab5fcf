#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use mjmlwatch::config::{CompileOptions, HostConfig, RawOptions};
use mjmlwatch::logging::Logger;
use mjmlwatch::types::CommandMode;

use crate::recording_logger::RecordingLogger;

/// Builder for `RawOptions` to simplify test setup.
///
/// Starts from the built-in defaults (`src/mjml` -> `mailings`, views in
/// `src/mjml/views`).
pub struct OptionsBuilder {
    raw: RawOptions,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawOptions::default(),
        }
    }

    pub fn input(mut self, input: &str) -> Self {
        self.raw.input = input.to_string();
        self
    }

    pub fn output(mut self, output: &str) -> Self {
        self.raw.output = output.to_string();
        self
    }

    pub fn views(mut self, views: &str) -> Self {
        self.raw.views = Some(views.to_string());
        self
    }

    pub fn no_views(mut self) -> Self {
        self.raw.views = None;
        self
    }

    pub fn extension(mut self, extension: &str) -> Self {
        self.raw.extension = extension.to_string();
        self
    }

    pub fn log(mut self, log: bool) -> Self {
        self.raw.log = log;
        self
    }

    pub fn watch(mut self, watch: bool) -> Self {
        self.raw.watch = watch;
        self
    }

    pub fn include_root(mut self, root: &str) -> Self {
        self.raw.engine.include_root = Some(root.to_string());
        self
    }

    pub fn build(self) -> RawOptions {
        self.raw
    }

    /// Resolve against a host in `mode`, rooted at `/project`.
    pub fn resolve(self, mode: CommandMode, logger: &RecordingLogger) -> CompileOptions {
        CompileOptions::resolve(self.raw, &host(mode, logger))
            .expect("Failed to resolve valid options from builder")
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Host settings with a recording logger.
pub fn host(mode: CommandMode, logger: &RecordingLogger) -> HostConfig {
    host_at(mode, logger, "/project")
}

pub fn host_at(mode: CommandMode, logger: &RecordingLogger, root: impl Into<PathBuf>) -> HostConfig {
    let logger: Arc<dyn Logger> = Arc::new(logger.clone());
    HostConfig {
        mode,
        root: root.into(),
        logger,
    }
}
