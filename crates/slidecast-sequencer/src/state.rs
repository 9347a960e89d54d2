//! Sequencer state and its read-only snapshot.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use slidecast_core::cancel::{CancelToken, WorkKind};
use slidecast_core::error::SequencerError;
use slidecast_core::scene::{Generation, SceneIndex};
use uuid::Uuid;

/// Where the current scene is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ScenePhase {
    /// Nothing has been shown yet.
    Idle,
    /// The slide transition from `from` to `to` is running.
    Advancing {
        /// Scene being left.
        from: SceneIndex,
        /// Scene being entered.
        to: SceneIndex,
    },
    /// Narration and demo of the scene are playing.
    Entering {
        /// Scene being played.
        scene: SceneIndex,
    },
    /// The scene is on screen with no narration or demo outstanding.
    Active {
        /// Scene on screen.
        scene: SceneIndex,
    },
}

impl ScenePhase {
    /// Whether a slide transition is running.
    #[must_use]
    pub fn is_in_transition(self) -> bool {
        matches!(self, Self::Advancing { .. })
    }
}

/// Read-only view of the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerSnapshot {
    /// Scene on screen.
    pub current_index: SceneIndex,
    /// Whether autoplay is on.
    pub playing: bool,
    /// Most recent scene entry.
    pub generation: Generation,
    /// Lifecycle phase.
    pub phase: ScenePhase,
    /// Whether an advance timer is pending.
    pub timer_armed: bool,
    /// Outstanding narration, demo and timer work.
    pub active_tokens: usize,
    /// Whether autoplay was turned off by pausing the narrator, so that
    /// turning it on resumes instead of restarting the scene.
    pub narration_paused: bool,
}

/// The single mutable state of a presentation, owned by the sequencer task.
#[derive(Debug)]
pub struct SequencerState {
    pub(crate) current_index: SceneIndex,
    pub(crate) playing: bool,
    pub(crate) generation: Generation,
    pub(crate) phase: ScenePhase,
    pub(crate) active_tokens: Vec<CancelToken>,
    /// Dwell time of the live generation once it settles.
    pub(crate) dwell: Duration,
    /// Correlation ID of the request that caused the latest transition.
    pub(crate) correlation_id: Uuid,
    pub(crate) narration_paused: bool,
}

impl SequencerState {
    /// Creates the state of a presentation that has not shown anything yet.
    #[must_use]
    pub fn new(playing: bool) -> Self {
        Self {
            current_index: SceneIndex::FIRST,
            playing,
            generation: Generation::default(),
            phase: ScenePhase::Idle,
            active_tokens: Vec::new(),
            dwell: Duration::ZERO,
            correlation_id: Uuid::nil(),
            narration_paused: false,
        }
    }

    /// Starts a new scene entry and returns its generation.
    pub(crate) fn begin_generation(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.generation
    }

    /// Tracks a token of the live generation.
    pub(crate) fn register(&mut self, token: CancelToken) {
        debug_assert_eq!(token.generation(), self.generation);
        self.active_tokens.push(token);
    }

    /// Removes and returns every outstanding token.
    pub(crate) fn take_tokens(&mut self) -> Vec<CancelToken> {
        std::mem::take(&mut self.active_tokens)
    }

    /// Removes and returns the outstanding tokens of the given kinds.
    pub(crate) fn take_kinds(&mut self, kinds: &[WorkKind]) -> Vec<CancelToken> {
        let (taken, kept) = std::mem::take(&mut self.active_tokens)
            .into_iter()
            .partition(|token| kinds.contains(&token.kind()));
        self.active_tokens = kept;
        taken
    }

    /// Checks that work of `kind` scheduled under `generation` is still
    /// outstanding.
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::StaleGeneration` if a newer scene entry has
    /// begun or the work was cleaned up.
    pub fn ensure_live(&self, generation: Generation, kind: WorkKind) -> Result<(), SequencerError> {
        let live = generation == self.generation
            && self
                .active_tokens
                .iter()
                .any(|token| token.generation() == generation && token.kind() == kind);
        if live {
            Ok(())
        } else {
            Err(SequencerError::StaleGeneration {
                generation,
                current: self.generation,
            })
        }
    }

    /// Whether work of `kind` is outstanding.
    #[must_use]
    pub fn has_outstanding(&self, kind: WorkKind) -> bool {
        self.active_tokens.iter().any(|token| token.kind() == kind)
    }

    /// Whether an advance timer is pending.
    #[must_use]
    pub fn timer_armed(&self) -> bool {
        self.has_outstanding(WorkKind::AdvanceTimer)
    }

    /// Returns a read-only view.
    #[must_use]
    pub fn snapshot(&self) -> SequencerSnapshot {
        SequencerSnapshot {
            current_index: self.current_index,
            playing: self.playing,
            generation: self.generation,
            phase: self.phase,
            timer_armed: self.timer_armed(),
            active_tokens: self.active_tokens.len(),
            narration_paused: self.narration_paused,
        }
    }
}
