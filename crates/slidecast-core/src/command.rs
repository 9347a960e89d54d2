//! Navigation commands.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scene::SceneIndex;

/// Trait that all commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the events it causes.
    fn correlation_id(&self) -> Uuid;
}

/// What a navigation request asks the sequencer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "index", rename_all = "snake_case")]
pub enum NavigationAction {
    /// Move to the following scene, wrapping around.
    Next,
    /// Move to the preceding scene, wrapping around.
    Previous,
    /// Jump to a specific scene.
    Goto(SceneIndex),
    /// Flip between playing and paused.
    ToggleAutoplay,
}

/// Where a navigation request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// A click, key press or API call.
    User,
    /// The advance timer of the live scene.
    Timer,
}

/// A request routed through the navigation surface.
#[derive(Debug, Clone, Copy)]
pub struct NavigationCommand {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The requested action.
    pub action: NavigationAction,
    /// Origin of the request.
    pub trigger: Trigger,
}

impl NavigationCommand {
    /// Creates a user-triggered command with a fresh correlation ID.
    #[must_use]
    pub fn user(action: NavigationAction) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            action,
            trigger: Trigger::User,
        }
    }

    /// Creates the command issued when an advance timer fires.
    #[must_use]
    pub fn timer() -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            action: NavigationAction::Next,
            trigger: Trigger::Timer,
        }
    }
}

impl Command for NavigationCommand {
    fn command_type(&self) -> &'static str {
        match self.action {
            NavigationAction::Next => "navigation.next",
            NavigationAction::Previous => "navigation.previous",
            NavigationAction::Goto(_) => "navigation.goto",
            NavigationAction::ToggleAutoplay => "navigation.toggle_autoplay",
        }
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
