// src/template/mod.rs

//! Seam between the compiler and the MJML templating engine.
//!
//! The compiler only knows that an engine turns source text into HTML or
//! fails with a message. The source path is passed along so the engine can
//! resolve `<mj-include>` paths relative to the template. Engine-specific settings live in [`EngineOptions`],
//! which is handed to the engine at construction time and never inspected by
//! the rest of the crate.

use std::fmt::Debug;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub mod include;
pub mod mrml_engine;

pub use mrml_engine::MrmlEngine;

/// Output of a successful render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
}

/// The engine rejected the source text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub trait TemplateEngine: Send + Sync + Debug {
    /// Render one MJML document, read from `path`, to HTML.
    fn render(&self, source: &str, path: &Path) -> Result<Rendered, RenderError>;
}

/// `[mjml]` section of the config, forwarded verbatim to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineOptions {
    /// Keep `<!-- -->` comments from the template in the generated HTML.
    #[serde(default = "default_keep_comments")]
    pub keep_comments: bool,

    /// Base URL used for `mj-social` icons.
    #[serde(default)]
    pub social_icon_origin: Option<String>,

    /// Directory `<mj-include path>` values are resolved against. Unset
    /// means the directory of the template being compiled.
    #[serde(default)]
    pub include_root: Option<String>,
}

fn default_keep_comments() -> bool {
    true
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            keep_comments: default_keep_comments(),
            social_icon_origin: None,
            include_root: None,
        }
    }
}
