//! Scene ordinals and generation counters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a scene in the presentation, `0..N-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneIndex(pub usize);

impl SceneIndex {
    /// The first scene of every presentation.
    pub const FIRST: Self = Self(0);

    /// Returns the raw ordinal.
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }

    /// The scene after this one, wrapping from the last scene to the first.
    ///
    /// `count` must be non-zero.
    #[must_use]
    pub fn next(self, count: usize) -> Self {
        Self((self.0 + 1) % count)
    }

    /// The scene before this one, wrapping from the first scene to the last.
    ///
    /// `count` must be non-zero.
    #[must_use]
    pub fn previous(self, count: usize) -> Self {
        Self((self.0 + count - 1) % count)
    }

    /// Whether this index addresses one of `count` scenes.
    #[must_use]
    pub fn is_within(self, count: usize) -> bool {
        self.0 < count
    }
}

impl fmt::Display for SceneIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one scene-entry attempt.
///
/// Strictly increasing for the lifetime of a presentation. Work tagged with
/// an older generation than the current one is stale and must not touch
/// sequencer state.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Generation(pub u64);

impl Generation {
    /// Returns the generation that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
