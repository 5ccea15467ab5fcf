use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use mjmlwatch::controller::{CompileBackend, RuntimeEvent};
use mjmlwatch::errors::Result;
use mjmlwatch::resolve::Location;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Compile(PathBuf),
    Rescan(Location),
}

/// A fake backend that:
/// - records every compile and re-scan it was asked for
/// - optionally reports `RescanFinished` right away (`auto_finish`);
///   otherwise the test sends it when it wants the pass to end.
pub struct FakeBackend {
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    calls: Arc<Mutex<Vec<BackendCall>>>,
    auto_finish: bool,
}

impl FakeBackend {
    pub fn new(runtime_tx: mpsc::Sender<RuntimeEvent>, calls: Arc<Mutex<Vec<BackendCall>>>) -> Self {
        Self {
            runtime_tx,
            calls,
            auto_finish: false,
        }
    }

    pub fn auto_finish(mut self) -> Self {
        self.auto_finish = true;
        self
    }
}

impl CompileBackend for FakeBackend {
    fn compile_file(
        &mut self,
        path: PathBuf,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let calls = Arc::clone(&self.calls);
        Box::pin(async move {
            calls.lock().unwrap().push(BackendCall::Compile(path));
            Ok(())
        })
    }

    fn spawn_rescan(&mut self, location: Location) {
        self.calls
            .lock()
            .unwrap()
            .push(BackendCall::Rescan(location.clone()));

        if self.auto_finish {
            let tx = self.runtime_tx.clone();
            tokio::spawn(async move {
                let _ = tx.send(RuntimeEvent::RescanFinished { location }).await;
            });
        }
    }
}
