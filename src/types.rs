// src/types.rs

use std::fmt;
use std::str::FromStr;

/// Which host command started the session.
///
/// - `Build`: one-shot production build. Compile failures abort the build.
/// - `Serve`: development session. Failures are logged and the watcher keeps
///   running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandMode {
    Build,
    Serve,
}

impl CommandMode {
    pub fn is_build(self) -> bool {
        matches!(self, CommandMode::Build)
    }
}

impl FromStr for CommandMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "build" => Ok(CommandMode::Build),
            "serve" | "dev" => Ok(CommandMode::Serve),
            other => Err(format!(
                "invalid command mode: {other} (expected \"build\" or \"serve\")"
            )),
        }
    }
}

/// Kind of filesystem notification delivered by the watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileEventKind {
    Add,
    Change,
    Unlink,
}

impl fmt::Display for FileEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileEventKind::Add => "add",
            FileEventKind::Change => "change",
            FileEventKind::Unlink => "unlink",
        };
        f.write_str(name)
    }
}
