// src/watch/event.rs

//! Translation of raw `notify` events into add / change / unlink.

use std::path::PathBuf;

use notify::event::{MetadataKind, ModifyKind, RenameMode};
use notify::{Event, EventKind};

use crate::types::FileEventKind;

/// Classify one `notify` event into `(kind, path)` pairs.
///
/// - create → add
/// - data / unknown modify, mtime change → change
/// - rename → unlink for the old name, add for the new one
/// - remove → unlink
///
/// Access events and other metadata changes are dropped.
pub fn classify_event(event: &Event) -> Vec<(FileEventKind, PathBuf)> {
    let with_kind = |kind: FileEventKind| -> Vec<(FileEventKind, PathBuf)> {
        event.paths.iter().cloned().map(|p| (kind, p)).collect()
    };

    match &event.kind {
        EventKind::Create(_) => with_kind(FileEventKind::Add),
        EventKind::Remove(_) => with_kind(FileEventKind::Unlink),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => with_kind(FileEventKind::Unlink),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => with_kind(FileEventKind::Add),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            let mut out = Vec::new();
            if let Some(from) = event.paths.first() {
                out.push((FileEventKind::Unlink, from.clone()));
            }
            if let Some(to) = event.paths.get(1) {
                out.push((FileEventKind::Add, to.clone()));
            }
            out
        }
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::WriteTime)) => {
            with_kind(FileEventKind::Change)
        }
        EventKind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
        EventKind::Modify(_) => with_kind(FileEventKind::Change),
        _ => Vec::new(),
    }
}
