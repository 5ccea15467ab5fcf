// src/controller/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::Result;

use super::backend::CompileBackend;
use super::core::ReloadCore;
use super::{ReloadCommand, RuntimeEvent};

/// Drives the watch session in response to `RuntimeEvent`s, and delegates
/// the actual compilation to a `CompileBackend`.
///
/// All decisions are made by [`ReloadCore`]; this struct only reads events
/// from the channel and executes the commands the core returns.
pub struct Runtime<B: CompileBackend> {
    core: ReloadCore,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    backend: B,
}

impl<B: CompileBackend> fmt::Debug for Runtime<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<B: CompileBackend> Runtime<B> {
    pub fn new(core: ReloadCore, event_rx: mpsc::Receiver<RuntimeEvent>, backend: B) -> Self {
        Self {
            core,
            event_rx,
            backend,
        }
    }

    pub fn core(&self) -> &ReloadCore {
        &self.core
    }

    /// Main event loop.
    ///
    /// - Consumes `RuntimeEvent`s from `event_rx`, one at a time.
    /// - Feeds them into the core.
    /// - Executes the commands returned by the core.
    ///
    /// Returns when the core requests exit or the channel closes.
    pub async fn run(mut self) -> Result<()> {
        info!("mjml watch runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command).await;
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        info!("runtime exiting");
        Ok(())
    }

    /// Execute a single command from the core.
    ///
    /// Errors never end the session: a file that fails to compile is
    /// reported and the next event is handled as usual.
    async fn execute_command(&mut self, command: ReloadCommand) {
        match command {
            ReloadCommand::CompileFile(path) => {
                if let Err(err) = self.backend.compile_file(path.clone()).await {
                    warn!(?path, error = %err, "failed to compile changed file");
                }
            }
            ReloadCommand::Rescan(location) => {
                debug!(%location, "starting re-scan");
                self.backend.spawn_rescan(location);
            }
            ReloadCommand::RequestExit => {
                info!("all passes finished; exit requested");
            }
        }
    }
}
