use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mjmlwatch::template::{RenderError, Rendered, TemplateEngine};

/// Marker that makes [`FakeEngine`] reject a source.
pub const BROKEN: &str = "<mj-broken>";

/// A deterministic engine that:
/// - wraps the source in `<html>...</html>`
/// - fails for any source containing [`BROKEN`]
/// - counts how often it was called.
#[derive(Debug, Clone, Default)]
pub struct FakeEngine {
    renders: Arc<AtomicUsize>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

impl TemplateEngine for FakeEngine {
    fn render(&self, source: &str, _path: &Path) -> Result<Rendered, RenderError> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        if source.contains(BROKEN) {
            return Err(RenderError::new("unexpected element mj-broken"));
        }
        Ok(Rendered {
            html: format!("<html>{}</html>", source.trim()),
        })
    }
}
