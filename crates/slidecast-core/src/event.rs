//! Sequencer events.
//!
//! Every observable transition of the sequencer is described by a
//! [`SequencerEvent`] and handed to an [`EventSink`](crate::sink::EventSink).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::command::Trigger;
use crate::scene::{Generation, SceneIndex};

/// Metadata attached to every sequencer event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Position of this event in the presentation's journal, starting at 1.
    pub sequence_number: u64,
    /// Correlation ID of the command that caused the event.
    pub correlation_id: Uuid,
    /// Generation that was live when the event was recorded.
    pub generation: Generation,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// Kind of asynchronous completion delivered back to the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionKind {
    /// The transition into a scene elapsed and its narration began.
    SceneStarted,
    /// Narration and demo of a scene both finished.
    SceneSettled,
    /// An advance timer elapsed.
    AdvanceDue,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SequencerEventKind {
    /// Narration and demo were started for a scene.
    SceneEntered {
        /// The scene entered.
        scene: SceneIndex,
    },
    /// Narration and demo of a scene both completed.
    SceneSettled {
        /// The settled scene.
        scene: SceneIndex,
        /// True when the settle watchdog gave up waiting.
        timed_out: bool,
    },
    /// The advance timer was armed.
    AdvanceTimerArmed {
        /// The scene the timer will leave.
        scene: SceneIndex,
        /// Dwell time before the timer fires.
        delay_ms: u64,
    },
    /// The advance timer fired.
    AdvanceTimerFired {
        /// The scene being left.
        scene: SceneIndex,
    },
    /// Outstanding work of a scene was torn down.
    SceneCleanedUp {
        /// The scene cleaned up.
        scene: SceneIndex,
        /// Number of cancel tokens cancelled.
        cancelled: usize,
    },
    /// The current scene changed.
    NavigationApplied {
        /// Scene before the change.
        from: SceneIndex,
        /// Scene after the change.
        to: SceneIndex,
        /// Origin of the change.
        trigger: Trigger,
    },
    /// Autoplay was switched on or off.
    AutoplayToggled {
        /// New autoplay state.
        playing: bool,
    },
    /// A completion from a superseded generation was ignored.
    StaleCompletionDiscarded {
        /// Which completion was ignored.
        completion: CompletionKind,
        /// Generation the completion belonged to.
        stale_generation: Generation,
    },
}

/// Event envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencerEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: SequencerEventKind,
}

impl SequencerEvent {
    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match &self.kind {
            SequencerEventKind::SceneEntered { .. } => "sequencer.scene_entered",
            SequencerEventKind::SceneSettled { .. } => "sequencer.scene_settled",
            SequencerEventKind::AdvanceTimerArmed { .. } => "sequencer.advance_timer_armed",
            SequencerEventKind::AdvanceTimerFired { .. } => "sequencer.advance_timer_fired",
            SequencerEventKind::SceneCleanedUp { .. } => "sequencer.scene_cleaned_up",
            SequencerEventKind::NavigationApplied { .. } => "sequencer.navigation_applied",
            SequencerEventKind::AutoplayToggled { .. } => "sequencer.autoplay_toggled",
            SequencerEventKind::StaleCompletionDiscarded { .. } => {
                "sequencer.stale_completion_discarded"
            }
        }
    }
}
