// src/watch/mod.rs

//! File watching.
//!
//! This module is responsible for:
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//! - Translating raw notifications into add / change / unlink events.
//! - Reporting paths relative to the project root.
//!
//! It does **not** decide whether an event matters; that is the
//! controller's job.

pub mod event;
pub mod path_utils;
pub mod watcher;

pub use event::classify_event;
pub use watcher::{spawn_watcher, WatcherHandle};
