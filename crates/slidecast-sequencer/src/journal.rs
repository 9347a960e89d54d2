//! Event recording and the in-memory event journal.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use slidecast_core::clock::Clock;
use slidecast_core::event::{EventMetadata, SequencerEvent, SequencerEventKind};
use slidecast_core::scene::Generation;
use slidecast_core::sink::EventSink;
use tracing::debug;
use uuid::Uuid;

/// Default number of events kept by an [`EventJournal`].
pub const DEFAULT_JOURNAL_CAPACITY: usize = 256;

/// A bounded sink keeping the most recent events; older ones are dropped.
#[derive(Debug)]
pub struct EventJournal {
    capacity: usize,
    entries: Mutex<VecDeque<SequencerEvent>>,
}

impl EventJournal {
    /// Creates a journal holding at most `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<SequencerEvent>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the retained events, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<SequencerEvent> {
        self.lock().iter().cloned().collect()
    }

    /// Number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no event has been retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for EventJournal {
    fn default() -> Self {
        Self::new(DEFAULT_JOURNAL_CAPACITY)
    }
}

impl EventSink for EventJournal {
    fn record(&self, event: &SequencerEvent) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(event.clone());
    }
}

/// Wraps event payloads in metadata and hands them to the sink.
pub(crate) struct EventRecorder {
    sink: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
    sequence_number: u64,
}

impl EventRecorder {
    pub(crate) fn new(sink: Arc<dyn EventSink>, clock: Arc<dyn Clock>) -> Self {
        Self {
            sink,
            clock,
            sequence_number: 0,
        }
    }

    pub(crate) fn record(
        &mut self,
        correlation_id: Uuid,
        generation: Generation,
        kind: SequencerEventKind,
    ) {
        self.sequence_number += 1;
        let event = SequencerEvent {
            metadata: EventMetadata {
                event_id: Uuid::now_v7(),
                sequence_number: self.sequence_number,
                correlation_id,
                generation,
                occurred_at: self.clock.now(),
            },
            kind,
        };
        debug!(
            event_type = event.event_type(),
            sequence_number = self.sequence_number,
            %generation,
            %correlation_id,
            "sequencer event"
        );
        self.sink.record(&event);
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use slidecast_core::scene::SceneIndex;
    use slidecast_test_support::FixedClock;

    use super::*;

    fn recorder(journal: &Arc<EventJournal>) -> EventRecorder {
        EventRecorder::new(
            Arc::clone(journal) as Arc<dyn EventSink>,
            Arc::new(FixedClock(DateTime::UNIX_EPOCH)),
        )
    }

    #[test]
    fn test_recorder_numbers_events_from_one() {
        let journal = Arc::new(EventJournal::default());
        let mut recorder = recorder(&journal);
        let correlation_id = Uuid::new_v4();

        recorder.record(
            correlation_id,
            Generation(1),
            SequencerEventKind::SceneEntered {
                scene: SceneIndex(0),
            },
        );
        recorder.record(
            correlation_id,
            Generation(1),
            SequencerEventKind::AutoplayToggled { playing: false },
        );

        let entries = journal.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].metadata.sequence_number, 1);
        assert_eq!(entries[1].metadata.sequence_number, 2);
        assert_eq!(entries[1].metadata.correlation_id, correlation_id);
        assert_eq!(entries[1].metadata.occurred_at, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_journal_drops_oldest_events_beyond_capacity() {
        let journal = Arc::new(EventJournal::new(2));
        let mut recorder = recorder(&journal);

        for scene in 0..3 {
            recorder.record(
                Uuid::nil(),
                Generation(1),
                SequencerEventKind::SceneEntered {
                    scene: SceneIndex(scene),
                },
            );
        }

        let sequence: Vec<u64> = journal
            .entries()
            .iter()
            .map(|event| event.metadata.sequence_number)
            .collect();
        assert_eq!(sequence, vec![2, 3]);
    }

    #[test]
    fn test_zero_capacity_journal_keeps_nothing() {
        let journal = Arc::new(EventJournal::new(0));
        let mut recorder = recorder(&journal);

        recorder.record(
            Uuid::nil(),
            Generation(0),
            SequencerEventKind::AutoplayToggled { playing: true },
        );

        assert!(journal.is_empty());
    }
}
