//! The presentation task.

use std::sync::Arc;

use slidecast_content::SceneRegistry;
use slidecast_core::clock::{Clock, SystemClock};
use slidecast_core::event::SequencerEventKind;
use slidecast_core::scene::SceneIndex;
use slidecast_core::sink::{DiscardingSink, EventSink};
use slidecast_demo::{Stage, VisualChange};
use slidecast_narration::Narrator;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cleanup::CleanupCoordinator;
use crate::config::SequencerConfig;
use crate::journal::EventRecorder;
use crate::lifecycle::Completion;
use crate::navigation::{PresentationHandle, Request};
use crate::state::{ScenePhase, SequencerState};

const REQUEST_BUFFER: usize = 32;

/// A presentation ready to start.
///
/// ```ignore
/// let (handle, task) = Presentation::new(registry, narrator, stage)
///     .with_sink(journal)
///     .start();
/// handle.next().await?;
/// ```
pub struct Presentation {
    registry: Arc<SceneRegistry>,
    narrator: Arc<dyn Narrator>,
    stage: Arc<dyn Stage>,
    sink: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
    config: SequencerConfig,
}

impl Presentation {
    /// Creates a presentation of `registry` with default configuration, the
    /// system clock and no event sink.
    #[must_use]
    pub fn new(
        registry: Arc<SceneRegistry>,
        narrator: Arc<dyn Narrator>,
        stage: Arc<dyn Stage>,
    ) -> Self {
        Self {
            registry,
            narrator,
            stage,
            sink: Arc::new(DiscardingSink),
            clock: Arc::new(SystemClock),
            config: SequencerConfig::default(),
        }
    }

    /// Records sequencer events into `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Timestamps events with `clock`.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the timing configuration.
    #[must_use]
    pub fn with_config(mut self, config: SequencerConfig) -> Self {
        self.config = config;
        self
    }

    /// Spawns the sequencer task, which shows the first scene and, with
    /// autoplay on, enters it.
    ///
    /// The task ends after [`PresentationHandle::shutdown`] or once every
    /// handle has been dropped. Must be called within a tokio runtime.
    #[must_use]
    pub fn start(self) -> (PresentationHandle, JoinHandle<()>) {
        let (request_tx, request_rx) = mpsc::channel(REQUEST_BUFFER);
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let scene_count = self.registry.count();

        let sequencer = Sequencer {
            state: SequencerState::new(self.config.autoplay),
            cleanup: CleanupCoordinator::new(
                Arc::clone(&self.registry),
                Arc::clone(&self.narrator),
                Arc::clone(&self.stage),
            ),
            recorder: EventRecorder::new(self.sink, self.clock),
            registry: self.registry,
            narrator: self.narrator,
            stage: self.stage,
            config: self.config,
            completions: completion_tx,
        };
        let task = tokio::spawn(run(sequencer, request_rx, completion_rx));
        (PresentationHandle::new(request_tx, scene_count), task)
    }
}

impl std::fmt::Debug for Presentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presentation")
            .field("scenes", &self.registry.count())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// State and collaborators owned by the sequencer task.
pub(crate) struct Sequencer {
    pub(crate) state: SequencerState,
    pub(crate) registry: Arc<SceneRegistry>,
    pub(crate) narrator: Arc<dyn Narrator>,
    pub(crate) stage: Arc<dyn Stage>,
    pub(crate) cleanup: CleanupCoordinator,
    pub(crate) recorder: EventRecorder,
    pub(crate) config: SequencerConfig,
    pub(crate) completions: mpsc::UnboundedSender<Completion>,
}

impl Sequencer {
    /// Shows the first scene and starts playback if autoplay is on.
    fn open(&mut self) {
        let first = SceneIndex::FIRST;
        info!(
            scenes = self.registry.count(),
            autoplay = self.state.playing,
            "presentation started"
        );
        self.stage.apply(VisualChange::SceneShown { scene: first });
        if !self.state.playing {
            self.state.phase = ScenePhase::Active { scene: first };
            return;
        }
        if let Err(error) = self.enter_scene(first, None) {
            warn!(%error, "cannot enter first scene");
            self.state.phase = ScenePhase::Active { scene: first };
        }
    }

    /// Tears the current scene down before the task ends.
    pub(crate) fn close(&mut self) {
        let scene = self.state.current_index;
        self.clean_up(scene);
        info!(%scene, "presentation stopped");
    }

    /// Runs the cleanup coordinator and journals what it cancelled.
    pub(crate) fn clean_up(&mut self, scene: SceneIndex) {
        let cancelled = self.cleanup.cleanup(&mut self.state, scene);
        if cancelled > 0 {
            self.record(SequencerEventKind::SceneCleanedUp { scene, cancelled });
        }
    }

    pub(crate) fn record(&mut self, kind: SequencerEventKind) {
        self.recorder
            .record(self.state.correlation_id, self.state.generation, kind);
    }
}

async fn run(
    mut sequencer: Sequencer,
    mut requests: mpsc::Receiver<Request>,
    mut completions: mpsc::UnboundedReceiver<Completion>,
) {
    sequencer.open();
    loop {
        tokio::select! {
            request = requests.recv() => {
                let Some(request) = request else {
                    break;
                };
                if sequencer.handle(request).is_break() {
                    return;
                }
            }
            Some(completion) = completions.recv() => sequencer.on_completion(completion),
        }
    }
    sequencer.close();
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use slidecast_test_support::{RecordingSink, ScriptedNarrator, registry};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_paused_presentation_shows_first_scene_without_playback() {
        let narrator = Arc::new(ScriptedNarrator::instant());
        let sink = Arc::new(RecordingSink::default());
        let (handle, _task) = Presentation::new(
            Arc::new(registry(&[("hello", 1000), ("bye", 1000)])),
            narrator.clone(),
            Arc::new(slidecast_demo::StageBoard::new()),
        )
        .with_sink(sink.clone())
        .with_config(SequencerConfig {
            autoplay: false,
            ..SequencerConfig::default()
        })
        .start();

        tokio::time::sleep(Duration::from_secs(5)).await;
        let snapshot = handle.snapshot().await.unwrap();

        assert_eq!(snapshot.phase, ScenePhase::Active { scene: SceneIndex(0) });
        assert!(!snapshot.playing);
        assert!(narrator.spoken().is_empty());
        assert!(sink.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_every_handle_stops_the_task() {
        let (handle, task) = Presentation::new(
            Arc::new(registry(&[("hello", 1000)])),
            Arc::new(ScriptedNarrator::instant()),
            Arc::new(slidecast_demo::StageBoard::new()),
        )
        .start();

        drop(handle);

        assert!(task.await.is_ok());
    }
}
