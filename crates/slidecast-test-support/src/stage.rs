//! Test stage — records every visual change.

use std::sync::Mutex;

use slidecast_demo::{Stage, VisualChange};

/// A stage that keeps every applied change in order.
#[derive(Debug, Default)]
pub struct RecordingStage {
    changes: Mutex<Vec<VisualChange>>,
}

impl RecordingStage {
    /// Returns a snapshot of all applied changes.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn changes(&self) -> Vec<VisualChange> {
        self.changes.lock().unwrap().clone()
    }

    /// Forgets every change recorded so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn clear(&self) {
        self.changes.lock().unwrap().clear();
    }
}

impl Stage for RecordingStage {
    fn apply(&self, change: VisualChange) {
        self.changes.lock().unwrap().push(change);
    }
}
