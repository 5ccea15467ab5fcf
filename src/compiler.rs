// src/compiler.rs

//! Compile-one-file and batch compilation over a location.
//!
//! Failure policy depends on the session:
//! - one-shot builds (`building = true`) return the first error, which aborts
//!   the build;
//! - development sessions report engine failures through the configured
//!   [`crate::logging::Logger`] and carry on, leaving the previous output on
//!   disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::CompileOptions;
use crate::errors::{MjmlError, Result};
use crate::fs::FileSystem;
use crate::resolve::{collect_source_files, to_output_path, Location};
use crate::template::TemplateEngine;

/// Result of compiling a single source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    Written {
        source: PathBuf,
        output: PathBuf,
        bytes: u64,
    },
    /// The engine rejected the file; already reported to the logger.
    Failed { source: PathBuf, message: String },
}

/// Counts for one pass over a location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub compiled: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.compiled + self.failed
    }
}

#[derive(Debug, Clone)]
pub struct Compiler {
    options: Arc<CompileOptions>,
    fs: Arc<dyn FileSystem>,
    engine: Arc<dyn TemplateEngine>,
}

impl Compiler {
    pub fn new(
        options: Arc<CompileOptions>,
        fs: Arc<dyn FileSystem>,
        engine: Arc<dyn TemplateEngine>,
    ) -> Self {
        Self {
            options,
            fs,
            engine,
        }
    }

    pub fn options(&self) -> &Arc<CompileOptions> {
        &self.options
    }

    /// Read, render and write one source file.
    ///
    /// Filesystem errors are always returned. Engine errors are returned as
    /// [`MjmlError::Compile`] when building, and as
    /// [`CompileOutcome::Failed`] otherwise.
    pub fn compile_one_file(&self, source: &Path) -> Result<CompileOutcome> {
        debug!(?source, "compiling input");

        let content = self.fs.read_to_string(source)?;

        let rendered = match self.engine.render(&content, source) {
            Ok(rendered) => rendered,
            Err(err) => {
                debug!(?source, error = %err, "engine rejected input");

                if self.options.is_building() {
                    return Err(MjmlError::Compile {
                        path: source.to_path_buf(),
                        message: err.message,
                    });
                }

                let logger = self.options.logger();
                logger.error("Could not compile MJML file.");
                logger.error(&format!("{}: {}", source.display(), err));

                return Ok(CompileOutcome::Failed {
                    source: source.to_path_buf(),
                    message: err.message,
                });
            }
        };

        let output = to_output_path(source, &self.options);
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs.create_dir_all(parent)?;
        }
        self.fs.write(&output, rendered.html.as_bytes())?;

        let bytes = self.fs.file_size(&output)?;
        if self.options.log_enabled() {
            self.options.logger().info(&format!(
                "{} -> {} ({} B)",
                source.display(),
                output.display(),
                bytes
            ));
        }
        debug!(?source, ?output, bytes, "compilation done");

        Ok(CompileOutcome::Written {
            source: source.to_path_buf(),
            output,
            bytes,
        })
    }

    /// Compile every source file of `location`, one after the other.
    ///
    /// When building, the first error stops the pass; files after it are not
    /// compiled. In development every file is attempted.
    pub fn compile_location(&self, location: &Location) -> Result<BatchSummary> {
        let files = collect_source_files(self.fs.as_ref(), location)?;
        debug!(%location, files = files.len(), "compiling location");

        let mut summary = BatchSummary::default();
        for file in files {
            match self.compile_one_file(&file) {
                Ok(CompileOutcome::Written { .. }) => summary.compiled += 1,
                Ok(CompileOutcome::Failed { .. }) => summary.failed += 1,
                Err(err) if !self.options.is_building() => {
                    warn!(file = ?file, error = %err, "failed to compile file; continuing");
                    summary.failed += 1;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(summary)
    }
}
