// src/controller/queue.rs

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::resolve::Location;

/// In-flight markers and queued follow-up passes, per location.
///
/// Semantics:
/// - At most one pass per location runs at a time.
/// - A request for a location that is already running marks a single
///   follow-up pass. Further requests fold into that mark, since the
///   follow-up reads the directory when it starts and sees every change
///   made before then.
/// - When a pass finishes and a follow-up is marked, the location stays in
///   flight and the follow-up starts immediately.
#[derive(Debug, Default)]
pub struct RescanQueue {
    in_flight: HashSet<Location>,
    pending: HashSet<Location>,
}

impl RescanQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing is running or queued.
    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty() && self.pending.is_empty()
    }

    pub fn is_in_flight(&self, location: &Location) -> bool {
        self.in_flight.contains(location)
    }

    /// Whether a follow-up pass is queued for `location`.
    pub fn has_pending(&self, location: &Location) -> bool {
        self.pending.contains(location)
    }

    /// Ask for a pass over `location`.
    ///
    /// Returns true if the caller should start it now (and the location is
    /// now marked in flight), false if it was queued or coalesced.
    pub fn request(&mut self, location: &Location) -> bool {
        if self.in_flight.insert(location.clone()) {
            debug!(%location, "starting pass");
            return true;
        }

        if self.pending.insert(location.clone()) {
            debug!(%location, "pass in flight; queued follow-up");
        } else {
            debug!(%location, "pass in flight; coalesced into queued follow-up");
        }
        false
    }

    /// Record that the pass over `location` finished.
    ///
    /// Returns true if a queued follow-up should start now; the location
    /// then stays in flight.
    pub fn finish(&mut self, location: &Location) -> bool {
        if !self.in_flight.contains(location) {
            warn!(%location, "finished a pass that was not in flight");
            return false;
        }

        if self.pending.remove(location) {
            debug!(%location, "starting queued follow-up pass");
            true
        } else {
            self.in_flight.remove(location);
            false
        }
    }

    /// Forget every queued follow-up. Running passes are unaffected.
    pub fn clear_pending(&mut self) {
        if !self.pending.is_empty() {
            debug!(dropped = self.pending.len(), "dropping queued follow-up passes");
        }
        self.pending.clear();
    }
}
