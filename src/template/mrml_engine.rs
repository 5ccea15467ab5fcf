// src/template/mrml_engine.rs

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mrml::prelude::parser::ParserOptions;
use mrml::prelude::render::RenderOptions;

use super::include::FsIncludeLoader;
use super::{EngineOptions, RenderError, Rendered, TemplateEngine};
use crate::fs::{FileSystem, RealFileSystem};

/// Production engine backed by the `mrml` crate.
pub struct MrmlEngine {
    render_options: RenderOptions,
    include_root: Option<PathBuf>,
    fs: Arc<dyn FileSystem>,
}

impl fmt::Debug for MrmlEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MrmlEngine")
            .field("disable_comments", &self.render_options.disable_comments)
            .field("include_root", &self.include_root)
            .finish_non_exhaustive()
    }
}

impl MrmlEngine {
    /// `fs` is where `<mj-include>`d partials are read from.
    pub fn new(options: &EngineOptions, fs: Arc<dyn FileSystem>) -> Self {
        let mut render_options = RenderOptions::default();
        render_options.disable_comments = !options.keep_comments;
        if let Some(origin) = &options.social_icon_origin {
            render_options.social_icon_origin = Some(Cow::Owned(origin.clone()));
        }
        Self {
            render_options,
            include_root: options.include_root.as_ref().map(PathBuf::from),
            fs,
        }
    }

    /// Base directory for the includes of the template at `path`.
    fn include_base(&self, path: &Path) -> PathBuf {
        match &self.include_root {
            Some(root) => root.clone(),
            None => path.parent().map(Path::to_path_buf).unwrap_or_default(),
        }
    }
}

impl Default for MrmlEngine {
    fn default() -> Self {
        Self::new(&EngineOptions::default(), Arc::new(RealFileSystem))
    }
}

impl TemplateEngine for MrmlEngine {
    fn render(&self, source: &str, path: &Path) -> Result<Rendered, RenderError> {
        let parser_options = ParserOptions {
            include_loader: Box::new(FsIncludeLoader::new(
                Arc::clone(&self.fs),
                self.include_base(path),
            )),
        };
        let parsed = mrml::parse_with_options(source, &parser_options)
            .map_err(|e| RenderError::new(e.to_string()))?;
        let html = parsed
            .element
            .render(&self.render_options)
            .map_err(|e| RenderError::new(e.to_string()))?;
        Ok(Rendered { html })
    }
}
