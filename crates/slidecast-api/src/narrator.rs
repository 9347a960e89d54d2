//! Narrator selection.

use std::sync::Arc;

use slidecast_narration::{Narrator, PacedNarrator, ProcessNarrator, SilentNarrator};
use tracing::info;

use crate::config::{AppConfig, NarratorKind};

/// The narrator voicing the presentation and, when speech is simulated,
/// the same narrator as a caption source.
pub struct NarratorChoice {
    /// Narrator handed to the sequencer.
    pub narrator: Arc<dyn Narrator>,
    /// Caption source served next to the stage.
    pub captions: Option<Arc<PacedNarrator>>,
}

/// Builds the narrator configured in `config`.
pub async fn build_narrator(config: &AppConfig) -> NarratorChoice {
    info!(narrator = ?config.narrator, "selecting narrator");
    match config.narrator {
        NarratorKind::Paced => {
            let paced = Arc::new(PacedNarrator::new(config.sequencer.word_duration));
            NarratorChoice {
                narrator: Arc::clone(&paced) as Arc<dyn Narrator>,
                captions: Some(paced),
            }
        }
        NarratorKind::Process => NarratorChoice {
            narrator: Arc::new(ProcessNarrator::discover(&config.narrator_config()).await),
            captions: None,
        },
        NarratorKind::Silent => NarratorChoice {
            narrator: Arc::new(SilentNarrator),
            captions: None,
        },
    }
}

impl std::fmt::Debug for NarratorChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarratorChoice")
            .field("captions", &self.captions.is_some())
            .finish_non_exhaustive()
    }
}
