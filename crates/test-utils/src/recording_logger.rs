use std::sync::{Arc, Mutex};

use mjmlwatch::logging::Logger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    Info(String),
    Error(String),
}

/// Logger that keeps every line, so tests can assert on what a user would
/// have seen. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|l| match l {
                LogLine::Info(s) => Some(s),
                LogLine::Error(_) => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|l| match l {
                LogLine::Error(s) => Some(s),
                LogLine::Info(_) => None,
            })
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn info(&self, message: &str) {
        self.lines.lock().unwrap().push(LogLine::Info(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.lines.lock().unwrap().push(LogLine::Error(message.to_string()));
    }
}
