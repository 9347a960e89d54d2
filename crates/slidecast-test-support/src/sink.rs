//! Test sink — records every sequencer event.

use std::sync::Mutex;

use slidecast_core::event::{SequencerEvent, SequencerEventKind};
use slidecast_core::sink::EventSink;

/// An event sink that keeps every recorded event in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SequencerEvent>>,
}

impl RecordingSink {
    /// Returns a snapshot of all recorded events.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn events(&self) -> Vec<SequencerEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Returns the payloads of all recorded events.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn kinds(&self) -> Vec<SequencerEventKind> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|event| event.kind.clone())
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: &SequencerEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
