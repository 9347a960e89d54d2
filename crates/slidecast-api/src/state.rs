//! Shared application state.

use std::sync::Arc;

use slidecast_content::SceneRegistry;
use slidecast_demo::StageBoard;
use slidecast_narration::PacedNarrator;
use slidecast_sequencer::{EventJournal, PresentationHandle};

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Handle to the running presentation.
    pub presentation: PresentationHandle,
    /// The scene table being presented.
    pub registry: Arc<SceneRegistry>,
    /// Materialized visual state.
    pub board: Arc<StageBoard>,
    /// Recent sequencer events.
    pub journal: Arc<EventJournal>,
    /// Source of on-screen captions, when narration is simulated.
    pub captions: Option<Arc<PacedNarrator>>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        presentation: PresentationHandle,
        registry: Arc<SceneRegistry>,
        board: Arc<StageBoard>,
        journal: Arc<EventJournal>,
    ) -> Self {
        Self {
            presentation,
            registry,
            board,
            journal,
            captions: None,
        }
    }

    /// Serves the caption of `narrator` alongside the stage.
    #[must_use]
    pub fn with_captions(mut self, narrator: Option<Arc<PacedNarrator>>) -> Self {
        self.captions = narrator;
        self
    }
}
