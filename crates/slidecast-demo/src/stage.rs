//! The visual surface demos draw on.

use serde::{Deserialize, Serialize};
use slidecast_core::scene::SceneIndex;

/// Who said a line of a scripted dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The person using the product.
    User,
    /// The product's assistant.
    Assistant,
}

/// Motion applied to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Animation {
    /// Move upwards.
    Up,
    /// Move downwards.
    Down,
    /// Back to the resting position.
    Rest,
}

/// Severity of a notification toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// Neutral information.
    Info,
    /// Something worked.
    Success,
    /// Something failed.
    Error,
}

/// One mutation of the visual state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum VisualChange {
    /// A scene became the visible slide.
    SceneShown {
        /// The visible scene.
        scene: SceneIndex,
    },
    /// Highlight one item of a group, un-highlighting the others.
    Highlight {
        /// Group of items.
        group: String,
        /// Item to highlight.
        item: String,
    },
    /// Remove every highlight of a group.
    ClearHighlights {
        /// Group of items.
        group: String,
    },
    /// Make the item at `index` of a group visible.
    Reveal {
        /// Group of items.
        group: String,
        /// Position of the item.
        index: usize,
    },
    /// Hide every item of a group.
    ConcealAll {
        /// Group of items.
        group: String,
    },
    /// Append a dialogue line to a transcript element.
    AppendLine {
        /// Transcript element.
        element: String,
        /// Who speaks.
        speaker: Speaker,
        /// What is said.
        text: String,
    },
    /// Show or hide a typing indicator on an element.
    Typing {
        /// Transcript element.
        element: String,
        /// Whether the indicator is shown.
        active: bool,
    },
    /// Reset an element to its empty state.
    ClearElement {
        /// Element to clear.
        element: String,
    },
    /// Replace the text of an element.
    SetText {
        /// Element to update.
        element: String,
        /// New text.
        text: String,
    },
    /// Start a motion on an element.
    Animate {
        /// Element to move.
        element: String,
        /// Motion to apply.
        animation: Animation,
    },
    /// Show a notification toast.
    Notify {
        /// Message shown.
        message: String,
        /// Severity.
        level: NotificationLevel,
    },
    /// Remove every notification toast.
    DismissNotifications,
}

/// Receiver of visual changes: the rendering layer.
///
/// `apply` is synchronous and must be idempotent for reset changes.
pub trait Stage: Send + Sync {
    /// Apply one change.
    fn apply(&self, change: VisualChange);
}

/// A stage without a display that writes every change to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStage;

impl Stage for TracingStage {
    fn apply(&self, change: VisualChange) {
        tracing::debug!(?change, "stage change");
    }
}

/// Forwards every change to each of its stages in order.
#[derive(Default)]
pub struct StageFanout {
    stages: Vec<std::sync::Arc<dyn Stage>>,
}

impl StageFanout {
    /// Creates a fanout over `stages`.
    #[must_use]
    pub fn new(stages: Vec<std::sync::Arc<dyn Stage>>) -> Self {
        Self { stages }
    }
}

impl Stage for StageFanout {
    fn apply(&self, change: VisualChange) {
        if let Some((last, rest)) = self.stages.split_last() {
            for stage in rest {
                stage.apply(change.clone());
            }
            last.apply(change);
        }
    }
}
