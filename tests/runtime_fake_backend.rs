// tests/runtime_fake_backend.rs

mod common;
use crate::common::fake_backend::{BackendCall, FakeBackend};
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use mjmlwatch::controller::{ReloadCore, Runtime, RuntimeEvent};
use mjmlwatch::resolve::Location;
use mjmlwatch::types::FileEventKind;

type TestResult = Result<(), Box<dyn Error>>;

fn views() -> Location {
    Location::parse("src/mjml/views")
}

fn event(kind: FileEventKind, path: &str) -> RuntimeEvent {
    RuntimeEvent::FileChanged {
        kind,
        path: PathBuf::from(path),
    }
}

fn compile(path: &str) -> BackendCall {
    BackendCall::Compile(PathBuf::from(path))
}

#[tokio::test]
async fn bursts_during_a_views_pass_coalesce_into_one_follow_up() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(64);
    let calls = Arc::new(Mutex::new(Vec::new()));
    let backend = FakeBackend::new(tx.clone(), Arc::clone(&calls));
    let core = ReloadCore::new("src/mjml", Some(views()));
    let runtime = Runtime::new(core, rx, backend);

    // The first change starts a views pass; four more arrive before it ends.
    tx.send(event(FileEventKind::Change, "src/mjml/a.mjml")).await?;
    for name in ["b", "c", "d", "e"] {
        tx.send(event(FileEventKind::Change, &format!("src/mjml/{name}.mjml")))
            .await?;
    }
    tx.send(RuntimeEvent::RescanFinished { location: views() }).await?;
    tx.send(RuntimeEvent::RescanFinished { location: views() }).await?;
    tx.send(RuntimeEvent::ShutdownRequested).await?;

    with_timeout(runtime.run()).await?;

    let calls = calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            compile("src/mjml/a.mjml"),
            BackendCall::Rescan(views()),
            compile("src/mjml/b.mjml"),
            compile("src/mjml/c.mjml"),
            compile("src/mjml/d.mjml"),
            compile("src/mjml/e.mjml"),
            BackendCall::Rescan(views()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn non_qualifying_events_do_nothing() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(64);
    let calls = Arc::new(Mutex::new(Vec::new()));
    let backend = FakeBackend::new(tx.clone(), Arc::clone(&calls));
    let runtime = Runtime::new(ReloadCore::new("src/mjml", Some(views())), rx, backend);

    tx.send(event(FileEventKind::Change, "other/dir/file.mjml")).await?;
    tx.send(event(FileEventKind::Add, "src/mjml/readme.txt")).await?;
    tx.send(event(FileEventKind::Change, "src/mjmlx/a.mjml")).await?;
    tx.send(RuntimeEvent::ShutdownRequested).await?;

    with_timeout(runtime.run()).await?;

    assert!(calls.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn add_change_and_unlink_each_refresh_views() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(64);
    let calls = Arc::new(Mutex::new(Vec::new()));
    let backend = FakeBackend::new(tx.clone(), Arc::clone(&calls));
    let runtime = Runtime::new(ReloadCore::new("src/mjml", Some(views())), rx, backend);

    for kind in [FileEventKind::Add, FileEventKind::Change, FileEventKind::Unlink] {
        tx.send(event(kind, "src/mjml/new.mjml")).await?;
        tx.send(RuntimeEvent::RescanFinished { location: views() }).await?;
    }
    tx.send(RuntimeEvent::ShutdownRequested).await?;
    with_timeout(runtime.run()).await?;

    // Unlink refreshes the views but cannot compile the removed file.
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            compile("src/mjml/new.mjml"),
            BackendCall::Rescan(views()),
            compile("src/mjml/new.mjml"),
            BackendCall::Rescan(views()),
            BackendCall::Rescan(views()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn shutdown_waits_for_the_running_pass() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(64);
    let calls = Arc::new(Mutex::new(Vec::new()));
    let backend = FakeBackend::new(tx.clone(), Arc::clone(&calls)).auto_finish();
    let runtime = Runtime::new(ReloadCore::new("src/mjml", Some(views())), rx, backend);

    tx.send(event(FileEventKind::Change, "src/mjml/a.mjml")).await?;
    tx.send(RuntimeEvent::ShutdownRequested).await?;

    // Only returns once the backend has reported the pass as finished.
    with_timeout(runtime.run()).await?;

    assert_eq!(
        *calls.lock().unwrap(),
        vec![compile("src/mjml/a.mjml"), BackendCall::Rescan(views())]
    );
    Ok(())
}

#[tokio::test]
async fn without_views_only_the_changed_file_compiles() -> TestResult {
    init_tracing();

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(64);
    let calls = Arc::new(Mutex::new(Vec::new()));
    let backend = FakeBackend::new(tx.clone(), Arc::clone(&calls));
    let runtime = Runtime::new(ReloadCore::new("src/mjml", None), rx, backend);

    tx.send(event(FileEventKind::Change, "src/mjml/a.mjml")).await?;
    tx.send(RuntimeEvent::ShutdownRequested).await?;
    with_timeout(runtime.run()).await?;

    assert_eq!(*calls.lock().unwrap(), vec![compile("src/mjml/a.mjml")]);
    Ok(())
}

#[tokio::test]
async fn closing_the_channel_ends_the_runtime() -> TestResult {
    let (tx, rx) = mpsc::channel::<RuntimeEvent>(4);
    let (backend_tx, _backend_rx) = mpsc::channel::<RuntimeEvent>(4);
    let calls = Arc::new(Mutex::new(Vec::new()));
    let backend = FakeBackend::new(backend_tx, Arc::clone(&calls));
    let runtime = Runtime::new(ReloadCore::new("src/mjml", None), rx, backend);

    tx.send(event(FileEventKind::Change, "src/mjml/a.mjml")).await?;
    drop(tx);
    with_timeout(runtime.run()).await?;

    assert_eq!(*calls.lock().unwrap(), vec![compile("src/mjml/a.mjml")]);
    Ok(())
}
