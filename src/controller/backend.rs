// src/controller/backend.rs

//! Pluggable compile backend abstraction.
//!
//! The runtime talks to a `CompileBackend` instead of calling the compiler
//! directly. Production code uses [`CompilerBackend`]; tests can provide an
//! implementation that records commands and reports completion on demand.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::compiler::{CompileOutcome, Compiler};
use crate::controller::RuntimeEvent;
use crate::errors::Result;
use crate::resolve::Location;

pub trait CompileBackend: Send {
    /// Compile one source file. The runtime awaits this before handling the
    /// next event.
    fn compile_file(
        &mut self,
        path: PathBuf,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Start a pass over every source file of `location` in the background.
    ///
    /// Implementations must eventually send
    /// `RuntimeEvent::RescanFinished { location }`, whatever the outcome.
    fn spawn_rescan(&mut self, location: Location);
}

/// Backend that runs the real [`Compiler`] on Tokio's blocking pool.
#[derive(Debug)]
pub struct CompilerBackend {
    compiler: Arc<Compiler>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
}

impl CompilerBackend {
    pub fn new(compiler: Arc<Compiler>, runtime_tx: mpsc::Sender<RuntimeEvent>) -> Self {
        Self {
            compiler,
            runtime_tx,
        }
    }
}

impl CompileBackend for CompilerBackend {
    fn compile_file(
        &mut self,
        path: PathBuf,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let compiler = Arc::clone(&self.compiler);

        Box::pin(async move {
            let outcome =
                tokio::task::spawn_blocking(move || compiler.compile_one_file(&path))
                    .await
                    .map_err(anyhow::Error::from)??;

            if let CompileOutcome::Failed { source, .. } = outcome {
                debug!(?source, "keeping previous output after failed compile");
            }
            Ok(())
        })
    }

    fn spawn_rescan(&mut self, location: Location) {
        let compiler = Arc::clone(&self.compiler);
        let tx = self.runtime_tx.clone();

        tokio::spawn(async move {
            let pass_location = location.clone();
            let result =
                tokio::task::spawn_blocking(move || compiler.compile_location(&pass_location))
                    .await;

            match result {
                Ok(Ok(summary)) => info!(
                    %location,
                    compiled = summary.compiled,
                    failed = summary.failed,
                    "re-scan finished"
                ),
                Ok(Err(err)) => warn!(%location, error = %err, "re-scan failed"),
                Err(err) => warn!(%location, error = %err, "re-scan task panicked"),
            }

            if let Err(err) = tx.send(RuntimeEvent::RescanFinished { location }).await {
                debug!("runtime gone before re-scan finished: {err}");
            }
        });
    }
}
