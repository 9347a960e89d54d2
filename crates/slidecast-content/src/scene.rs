//! Scene definitions.

use std::time::Duration;

use serde::Deserialize;
use slidecast_core::scene::SceneIndex;
use slidecast_demo::DemoScript;

/// A scene as written in the table. Its index is its position.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SceneRecord {
    pub title: String,
    #[serde(default)]
    pub narration: String,
    #[serde(default)]
    pub demo: Option<DemoScript>,
    #[serde(default)]
    pub minimum_duration_ms: u64,
}

/// The top-level shape of a scene table.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SceneTable {
    pub scenes: Vec<SceneRecord>,
}

/// One immutable scene of the presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDefinition {
    /// Position in the presentation.
    pub index: SceneIndex,
    /// Heading shown to the audience.
    pub title: String,
    /// Text spoken while the scene is live.
    pub narration: String,
    /// Demo played alongside the narration.
    pub demo: Option<DemoScript>,
    /// Shortest time the scene stays on screen.
    pub minimum_duration: Duration,
}

impl SceneDefinition {
    pub(crate) fn from_record(index: usize, record: SceneRecord) -> Self {
        Self {
            index: SceneIndex(index),
            title: record.title,
            narration: record.narration,
            demo: record.demo,
            minimum_duration: Duration::from_millis(record.minimum_duration_ms),
        }
    }
}
