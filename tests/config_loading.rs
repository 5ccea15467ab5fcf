// tests/config_loading.rs

mod common;
use crate::common::builders::{host, host_at};
use crate::common::recording_logger::RecordingLogger;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use mjmlwatch::config::{load_from_path, load_or_default, CompileOptions, RawOptions};
use mjmlwatch::errors::MjmlError;
use mjmlwatch::types::CommandMode;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn full_config_file_is_loaded() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("Mjml.toml");
    fs::write(
        &path,
        r#"
input = "templates"
views = "templates/pages"
output = "dist/mail"
extension = "htm"
log = false
watch = false

[mjml]
keep_comments = false
social_icon_origin = "https://cdn.example.com/icons/"
include_root = "templates/partials"
"#,
    )?;

    let raw = load_from_path(&path)?;
    assert_eq!(raw.input, "templates");
    assert!(!raw.engine.keep_comments);
    assert_eq!(
        raw.engine.social_icon_origin.as_deref(),
        Some("https://cdn.example.com/icons/")
    );
    assert_eq!(raw.engine.include_root.as_deref(), Some("templates/partials"));

    let logger = RecordingLogger::new();
    let options = CompileOptions::resolve(raw, &host(CommandMode::Serve, &logger))?;
    assert_eq!(options.input(), Path::new("templates"));
    assert_eq!(options.views(), Some(Path::new("templates/pages")));
    assert_eq!(options.output(), Path::new("dist/mail"));
    assert_eq!(options.extension(), ".htm");
    assert!(!options.log_enabled());
    assert!(!options.watch_enabled());
    assert!(!options.is_building());
    Ok(())
}

#[test]
fn empty_file_gives_defaults() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("Mjml.toml");
    fs::write(&path, "")?;

    let raw = load_from_path(&path)?;
    let defaults = RawOptions::default();
    assert_eq!(raw.input, defaults.input);
    assert_eq!(raw.views, defaults.views);
    assert_eq!(raw.output, "mailings");
    assert_eq!(raw.extension, ".html");
    assert!(raw.log && raw.watch);
    Ok(())
}

#[test]
fn empty_views_disables_the_rescan() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("Mjml.toml");
    fs::write(&path, "views = \"\"\n")?;

    let logger = RecordingLogger::new();
    let options = CompileOptions::resolve(
        load_from_path(&path)?,
        &host(CommandMode::Serve, &logger),
    )?;
    assert_eq!(options.views(), None);
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("Mjml.toml");
    fs::write(&path, "inptu = \"typo\"\n")?;

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, MjmlError::TomlError(_)));
    Ok(())
}

#[test]
fn explicit_missing_file_is_an_error() {
    let err = load_or_default(Some(Path::new("/definitely/missing/Mjml.toml"))).unwrap_err();
    assert!(matches!(err, MjmlError::IoError(_)));
}

#[test]
fn absolute_paths_under_the_root_become_relative() -> TestResult {
    let root = PathBuf::from("/project");
    let raw = RawOptions {
        input: "/project/src/mjml".to_string(),
        views: Some("/project/src/mjml/views".to_string()),
        output: "/project/mailings".to_string(),
        ..RawOptions::default()
    };

    let logger = RecordingLogger::new();
    let options = CompileOptions::resolve(raw, &host_at(CommandMode::Build, &logger, root))?;
    assert_eq!(options.input(), Path::new("src/mjml"));
    assert_eq!(options.views(), Some(Path::new("src/mjml/views")));
    assert_eq!(options.output(), Path::new("mailings"));
    assert!(options.is_building());
    Ok(())
}

#[test]
fn output_overwriting_sources_is_rejected() {
    let raw = RawOptions {
        output: "src/mjml".to_string(),
        extension: ".mjml".to_string(),
        ..RawOptions::default()
    };
    let logger = RecordingLogger::new();
    let err = CompileOptions::resolve(raw, &host(CommandMode::Build, &logger)).unwrap_err();
    assert!(matches!(err, MjmlError::ConfigError(_)));
}
