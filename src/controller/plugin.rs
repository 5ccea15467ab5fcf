// src/controller/plugin.rs

//! Lifecycle hooks the host calls, in order:
//!
//! 1. [`MjmlPlugin::config_resolved`] once the host configuration is final;
//! 2. [`MjmlPlugin::build_end`] at the end of a one-shot build, or
//!    [`MjmlPlugin::configure_server`] when a development session starts.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::compiler::{BatchSummary, Compiler};
use crate::config::{CompileOptions, HostConfig, RawOptions};
use crate::controller::backend::CompilerBackend;
use crate::controller::core::ReloadCore;
use crate::controller::runtime::Runtime;
use crate::controller::RuntimeEvent;
use crate::errors::{MjmlError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::resolve::Location;
use crate::template::{MrmlEngine, TemplateEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Configuration not resolved yet.
    Idle,
    Configured,
    /// A one-shot full pass is running.
    Compiling,
    /// A watch runtime was handed to the host.
    Watching,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ControllerState::Idle => "idle",
            ControllerState::Configured => "configured",
            ControllerState::Compiling => "compiling",
            ControllerState::Watching => "watching",
        };
        f.write_str(s)
    }
}

pub struct MjmlPlugin {
    raw: RawOptions,
    fs: Arc<dyn FileSystem>,
    engine: Option<Arc<dyn TemplateEngine>>,
    compiler: Option<Arc<Compiler>>,
    state: ControllerState,
}

impl fmt::Debug for MjmlPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MjmlPlugin")
            .field("state", &self.state)
            .field("options", &self.compiler.as_ref().map(|c| c.options()))
            .finish_non_exhaustive()
    }
}

impl MjmlPlugin {
    /// Plugin on the real filesystem; the MJML engine is built from the
    /// `[mjml]` options once the configuration is resolved.
    pub fn new(raw: RawOptions) -> Self {
        Self {
            raw,
            fs: Arc::new(RealFileSystem),
            engine: None,
            compiler: None,
            state: ControllerState::Idle,
        }
    }

    /// Plugin with an explicit filesystem and engine.
    pub fn with_engine(
        raw: RawOptions,
        fs: Arc<dyn FileSystem>,
        engine: Arc<dyn TemplateEngine>,
    ) -> Self {
        Self {
            raw,
            fs,
            engine: Some(engine),
            compiler: None,
            state: ControllerState::Idle,
        }
    }

    pub fn name(&self) -> &'static str {
        "mjml"
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Resolved configuration, once `config_resolved` has run.
    pub fn options(&self) -> Option<&Arc<CompileOptions>> {
        self.compiler.as_ref().map(|c| c.options())
    }

    /// Merge the user options with the host settings. Must be called once,
    /// before any other hook.
    pub fn config_resolved(&mut self, host: &HostConfig) -> Result<()> {
        if self.state != ControllerState::Idle {
            return Err(MjmlError::Lifecycle(format!(
                "configuration already resolved (state: {})",
                self.state
            )));
        }

        let options = Arc::new(CompileOptions::resolve(self.raw.clone(), host)?);
        let engine: Arc<dyn TemplateEngine> = match &self.engine {
            Some(engine) => Arc::clone(engine),
            None => Arc::new(MrmlEngine::new(
                options.engine_options(),
                Arc::clone(&self.fs),
            )),
        };

        debug!(?options, "configuration resolved");

        self.compiler = Some(Arc::new(Compiler::new(
            options,
            Arc::clone(&self.fs),
            engine,
        )));
        self.state = ControllerState::Configured;
        Ok(())
    }

    /// Full pass over `input` at the end of a one-shot build.
    ///
    /// Does nothing in development sessions. The first error aborts the
    /// pass and is returned to the host.
    pub fn build_end(&mut self) -> Result<BatchSummary> {
        let compiler = self.configured("build_end")?;

        if !compiler.options().is_building() {
            debug!("not building; skipping full pass");
            return Ok(BatchSummary::default());
        }

        let location = Location::from_path(compiler.options().input());
        self.state = ControllerState::Compiling;
        let result = compiler.compile_location(&location);
        self.state = ControllerState::Configured;

        let summary = result?;
        info!(%location, compiled = summary.compiled, "full pass finished");
        Ok(summary)
    }

    /// Set up the watch session.
    ///
    /// Returns the runtime that handles events from `event_rx`; re-scan
    /// completions are reported through `event_tx`. Returns `None` when
    /// watching is disabled or the session is a one-shot build.
    pub fn configure_server(
        &mut self,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        event_tx: mpsc::Sender<RuntimeEvent>,
    ) -> Result<Option<Runtime<CompilerBackend>>> {
        let compiler = self.configured("configure_server")?;

        if self.state == ControllerState::Watching {
            return Err(MjmlError::Lifecycle(
                "server already configured".to_string(),
            ));
        }

        let options = compiler.options();
        if options.is_building() {
            debug!("one-shot build; no watch session");
            return Ok(None);
        }
        if !options.watch_enabled() {
            debug!("watching disabled");
            return Ok(None);
        }

        let core = ReloadCore::from_options(options);
        let backend = CompilerBackend::new(compiler, event_tx);

        self.state = ControllerState::Watching;
        debug!("configured server");
        Ok(Some(Runtime::new(core, event_rx, backend)))
    }

    fn configured(&self, hook: &str) -> Result<Arc<Compiler>> {
        self.compiler.clone().ok_or_else(|| {
            MjmlError::Lifecycle(format!("`{hook}` called before `config_resolved`"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use crate::logging::Logger;
    use crate::template::{RenderError, Rendered};
    use crate::types::CommandMode;
    use std::path::PathBuf;

    #[derive(Debug)]
    struct EchoEngine;

    impl TemplateEngine for EchoEngine {
        fn render(
            &self,
            source: &str,
            _path: &std::path::Path,
        ) -> std::result::Result<Rendered, RenderError> {
            Ok(Rendered {
                html: source.to_string(),
            })
        }
    }

    #[derive(Debug)]
    struct Silent;

    impl Logger for Silent {
        fn info(&self, _message: &str) {}
        fn error(&self, _message: &str) {}
    }

    fn host(mode: CommandMode) -> HostConfig {
        HostConfig {
            mode,
            root: PathBuf::from("/project"),
            logger: Arc::new(Silent),
        }
    }

    fn plugin(fs: &MockFileSystem) -> MjmlPlugin {
        MjmlPlugin::with_engine(
            RawOptions::default(),
            Arc::new(fs.clone()),
            Arc::new(EchoEngine),
        )
    }

    #[test]
    fn hooks_before_config_are_lifecycle_errors() {
        let fs = MockFileSystem::new();
        let mut plugin = plugin(&fs);
        assert_eq!(plugin.name(), "mjml");
        assert!(matches!(plugin.build_end(), Err(MjmlError::Lifecycle(_))));
        assert_eq!(plugin.state(), ControllerState::Idle);
    }

    #[test]
    fn config_resolved_twice_is_rejected() {
        let fs = MockFileSystem::new();
        let mut plugin = plugin(&fs);
        plugin.config_resolved(&host(CommandMode::Build)).unwrap();
        assert_eq!(plugin.state(), ControllerState::Configured);
        assert!(matches!(
            plugin.config_resolved(&host(CommandMode::Build)),
            Err(MjmlError::Lifecycle(_))
        ));
    }

    #[test]
    fn build_end_compiles_input_when_building() {
        let fs = MockFileSystem::new();
        fs.add_file("src/mjml/a.mjml", "A");
        fs.add_file("src/mjml/views/b.mjml", "B");
        let mut plugin = plugin(&fs);
        plugin.config_resolved(&host(CommandMode::Build)).unwrap();

        let summary = plugin.build_end().unwrap();
        assert_eq!(summary.compiled, 2);
        assert_eq!(fs.contents("mailings/a.html").as_deref(), Some("A"));
        assert_eq!(fs.contents("mailings/views/b.html").as_deref(), Some("B"));
        assert_eq!(plugin.state(), ControllerState::Configured);
    }

    #[test]
    fn build_end_is_a_no_op_in_development() {
        let fs = MockFileSystem::new();
        fs.add_file("src/mjml/a.mjml", "A");
        let mut plugin = plugin(&fs);
        plugin.config_resolved(&host(CommandMode::Serve)).unwrap();

        assert_eq!(plugin.build_end().unwrap().total(), 0);
        assert!(fs.reads().is_empty());
    }

    #[tokio::test]
    async fn configure_server_enters_watching_once() {
        let fs = MockFileSystem::new();
        let mut plugin = plugin(&fs);
        plugin.config_resolved(&host(CommandMode::Serve)).unwrap();

        let (tx, rx) = mpsc::channel(8);
        let runtime = plugin.configure_server(rx, tx).unwrap();
        assert!(runtime.is_some());
        assert_eq!(plugin.state(), ControllerState::Watching);

        let (tx, rx) = mpsc::channel(8);
        assert!(matches!(
            plugin.configure_server(rx, tx),
            Err(MjmlError::Lifecycle(_))
        ));
    }

    #[tokio::test]
    async fn watch_disabled_returns_no_runtime() {
        let fs = MockFileSystem::new();
        let raw = RawOptions {
            watch: false,
            ..RawOptions::default()
        };
        let mut plugin = MjmlPlugin::with_engine(raw, Arc::new(fs), Arc::new(EchoEngine));
        plugin.config_resolved(&host(CommandMode::Serve)).unwrap();

        let (tx, rx) = mpsc::channel(8);
        assert!(plugin.configure_server(rx, tx).unwrap().is_none());
        assert_eq!(plugin.state(), ControllerState::Configured);
    }
}
