// src/config/model.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::logging::Logger;
use crate::template::EngineOptions;
use crate::types::CommandMode;

/// User-facing options as read from `Mjml.toml`.
///
/// ```toml
/// input = "src/mjml"
/// views = "src/mjml/views"   # "" disables the views re-scan
/// output = "mailings"
/// extension = ".html"
/// log = true
/// watch = true
///
/// [mjml]
/// keep_comments = false
/// include_root = "src/mjml"  # default: next to each template
/// ```
///
/// Every key is optional. This is the *unvalidated* form; use
/// [`CompileOptions::resolve`] to obtain the session configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawOptions {
    /// Root directory of MJML sources.
    #[serde(default = "default_input")]
    pub input: String,

    /// Directory re-compiled as a whole after any single-file change.
    #[serde(default = "default_views")]
    pub views: Option<String>,

    /// Root directory of generated HTML.
    #[serde(default = "default_output")]
    pub output: String,

    /// Suffix of generated files.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Print one summary line per compiled file.
    #[serde(default = "default_true")]
    pub log: bool,

    /// Recompile on change during development sessions.
    #[serde(default = "default_true")]
    pub watch: bool,

    /// Options forwarded to the templating engine.
    #[serde(default, rename = "mjml")]
    pub engine: EngineOptions,
}

fn default_input() -> String {
    "src/mjml".to_string()
}

fn default_views() -> Option<String> {
    Some("src/mjml/views".to_string())
}

fn default_output() -> String {
    "mailings".to_string()
}

fn default_extension() -> String {
    ".html".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            input: default_input(),
            views: default_views(),
            output: default_output(),
            extension: default_extension(),
            log: true,
            watch: true,
            engine: EngineOptions::default(),
        }
    }
}

/// What the host knows once its own configuration is final.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub mode: CommandMode,
    /// Project root; watched recursively and used to relativize paths.
    pub root: PathBuf,
    pub logger: Arc<dyn Logger>,
}

/// Session configuration, resolved once and read-only afterwards.
///
/// Constructed via [`CompileOptions::resolve`], which validates the raw
/// options; the fields are only reachable through accessors.
#[derive(Clone)]
pub struct CompileOptions {
    input: PathBuf,
    views: Option<PathBuf>,
    output: PathBuf,
    extension: String,
    log: bool,
    watch: bool,
    building: bool,
    engine: EngineOptions,
    logger: Arc<dyn Logger>,
}

impl fmt::Debug for CompileOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileOptions")
            .field("input", &self.input)
            .field("views", &self.views)
            .field("output", &self.output)
            .field("extension", &self.extension)
            .field("log", &self.log)
            .field("watch", &self.watch)
            .field("building", &self.building)
            .finish_non_exhaustive()
    }
}

impl CompileOptions {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new_unchecked(
        input: PathBuf,
        views: Option<PathBuf>,
        output: PathBuf,
        extension: String,
        log: bool,
        watch: bool,
        building: bool,
        engine: EngineOptions,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            input,
            views,
            output,
            extension,
            log,
            watch,
            building,
            engine,
            logger,
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn views(&self) -> Option<&Path> {
        self.views.as_deref()
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Output suffix including the leading dot (e.g. `".html"`), or empty.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn log_enabled(&self) -> bool {
        self.log
    }

    pub fn watch_enabled(&self) -> bool {
        self.watch
    }

    /// True only for one-shot production builds.
    pub fn is_building(&self) -> bool {
        self.building
    }

    pub fn engine_options(&self) -> &EngineOptions {
        &self.engine
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }
}
