//! In-memory materialization of the stage.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use slidecast_core::scene::SceneIndex;
use tracing::trace;

use crate::stage::{Animation, NotificationLevel, Speaker, Stage, VisualChange};

/// A dialogue line shown in a transcript element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptLine {
    /// Who spoke.
    pub speaker: Speaker,
    /// What was said.
    pub text: String,
}

/// Visual state of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementState {
    /// Current text, if set.
    pub text: Option<String>,
    /// Transcript lines, oldest first.
    pub lines: Vec<TranscriptLine>,
    /// Whether a typing indicator is shown.
    pub typing: bool,
    /// Current motion.
    pub animation: Option<Animation>,
}

/// A visible notification toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Message shown.
    pub message: String,
    /// Severity.
    pub level: NotificationLevel,
}

/// Everything currently visible.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StageSnapshot {
    /// The visible scene.
    pub scene: Option<SceneIndex>,
    /// Highlighted item per group.
    pub highlights: BTreeMap<String, String>,
    /// Revealed item positions per group.
    pub revealed: BTreeMap<String, BTreeSet<usize>>,
    /// Element states by element name.
    pub elements: BTreeMap<String, ElementState>,
    /// Visible notifications, oldest first.
    pub notifications: Vec<Notification>,
}

/// A [`Stage`] that keeps the resulting visual state in memory so that a
/// front end can poll it.
#[derive(Debug, Default)]
pub struct StageBoard {
    state: Mutex<StageSnapshot>,
}

impl StageBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StageSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current visual state.
    #[must_use]
    pub fn snapshot(&self) -> StageSnapshot {
        self.lock().clone()
    }
}

impl Stage for StageBoard {
    fn apply(&self, change: VisualChange) {
        trace!(?change, "stage change");
        let mut state = self.lock();
        match change {
            VisualChange::SceneShown { scene } => state.scene = Some(scene),
            VisualChange::Highlight { group, item } => {
                state.highlights.insert(group, item);
            }
            VisualChange::ClearHighlights { group } => {
                state.highlights.remove(&group);
            }
            VisualChange::Reveal { group, index } => {
                state.revealed.entry(group).or_default().insert(index);
            }
            VisualChange::ConcealAll { group } => {
                state.revealed.remove(&group);
            }
            VisualChange::AppendLine {
                element,
                speaker,
                text,
            } => {
                let element = state.elements.entry(element).or_default();
                element.lines.push(TranscriptLine { speaker, text });
            }
            VisualChange::Typing { element, active } => {
                state.elements.entry(element).or_default().typing = active;
            }
            VisualChange::ClearElement { element } => {
                state.elements.remove(&element);
            }
            VisualChange::SetText { element, text } => {
                state.elements.entry(element).or_default().text = Some(text);
            }
            VisualChange::Animate { element, animation } => {
                state.elements.entry(element).or_default().animation = Some(animation);
            }
            VisualChange::Notify { message, level } => {
                state.notifications.push(Notification { message, level });
            }
            VisualChange::DismissNotifications => state.notifications.clear(),
        }
    }
}
