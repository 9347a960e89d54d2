//! Event sink abstraction.

use crate::event::SequencerEvent;

/// Receives every event the sequencer records.
///
/// Called synchronously from the sequencer task, so implementations must not
/// block.
pub trait EventSink: Send + Sync {
    /// Record one event.
    fn record(&self, event: &SequencerEvent);
}

/// A sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardingSink;

impl EventSink for DiscardingSink {
    fn record(&self, _event: &SequencerEvent) {}
}
