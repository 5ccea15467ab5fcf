// src/template/include.rs

//! `<mj-include>` support for the `mrml` engine.
//!
//! `mrml` hands the raw `path` attribute to an [`IncludeLoader`]. Relative
//! paths are joined onto a base directory (the directory of the template
//! being rendered, or the configured `include_root`) and `..` segments are
//! folded lexically, so `../partials/header.mjml` works from a view and the
//! loader runs unchanged over the in-memory filesystem used in tests.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use mrml::prelude::parser::loader::{IncludeLoader, IncludeLoaderError};
use tracing::debug;

use crate::fs::FileSystem;

/// Loads included templates through the crate's [`FileSystem`].
#[derive(Debug, Clone)]
pub struct FsIncludeLoader {
    fs: Arc<dyn FileSystem>,
    base: PathBuf,
}

impl FsIncludeLoader {
    pub fn new(fs: Arc<dyn FileSystem>, base: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            base: base.into(),
        }
    }

    /// Where the `path` attribute of an include points to.
    pub fn locate(&self, path: &str) -> PathBuf {
        let path = path.strip_prefix("file://").unwrap_or(path);
        fold_parents(&self.base.join(path))
    }
}

impl IncludeLoader for FsIncludeLoader {
    fn resolve(&self, path: &str) -> Result<String, IncludeLoaderError> {
        let target = self.locate(path);
        debug!(include = path, ?target, "loading included template");

        if !self.fs.is_file(&target) {
            return Err(IncludeLoaderError::not_found(path)
                .with_message("included template does not exist"));
        }

        let content = self.fs.read_to_string(&target).map_err(|err| {
            let cause: Box<dyn std::error::Error + Send + Sync> = err.into();
            IncludeLoaderError::new(path, ErrorKind::InvalidData)
                .with_message("unable to read included template")
                .with_cause(Arc::from(cause))
        })?;

        Ok(body_fragment(&content).to_string())
    }
}

/// Partials may be full documents so they also compile on their own; only
/// the children of their `<mj-body>` are spliced into the including template.
pub fn body_fragment(content: &str) -> &str {
    if !content.trim_start().starts_with("<mjml") {
        return content;
    }

    let Some(open) = content.find("<mj-body") else {
        return content;
    };
    let Some(open_end) = content[open..].find('>').map(|i| open + i + 1) else {
        return content;
    };
    if content[..open_end].ends_with("/>") {
        return "";
    }
    match content.rfind("</mj-body>") {
        Some(close) if close >= open_end => &content[open_end..close],
        _ => content,
    }
}

/// Resolve `.` and `..` without touching the filesystem. `..` above the
/// first component of a relative path is kept.
fn fold_parents(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
