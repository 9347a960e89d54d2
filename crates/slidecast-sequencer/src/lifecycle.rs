//! Scene lifecycle: entry, settle, advance timer.
//!
//! Entering a scene spawns one task that waits out the slide transition,
//! then plays narration and demo concurrently. The task reports back through
//! [`Completion`] messages tagged with its generation; the sequencer task
//! checks each one against the live generation before acting on it.

use std::sync::Arc;
use std::time::Duration;

use slidecast_content::SceneDefinition;
use slidecast_core::cancel::{CancelToken, WorkKind};
use slidecast_core::command::NavigationCommand;
use slidecast_core::error::SequencerError;
use slidecast_core::event::{CompletionKind, SequencerEventKind};
use slidecast_core::scene::{Generation, SceneIndex};
use slidecast_demo::{DemoContext, Stage, run_demo};
use slidecast_narration::{Narrator, estimated_duration};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::engine::Sequencer;
use crate::state::ScenePhase;

/// How long a scene stays on screen once settled: the narration estimate or
/// the scene's minimum, whichever is longer.
#[must_use]
pub fn effective_duration(scene: &SceneDefinition, word_duration: Duration) -> Duration {
    estimated_duration(&scene.narration, word_duration).max(scene.minimum_duration)
}

/// Asynchronous outcome reported back to the sequencer task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Completion {
    /// The transition elapsed and narration started.
    Started { generation: Generation },
    /// Narration and demo both finished, or the watchdog gave up on them.
    Settled {
        generation: Generation,
        timed_out: bool,
    },
    /// The advance timer elapsed.
    AdvanceDue { generation: Generation },
}

impl Completion {
    fn generation(self) -> Generation {
        match self {
            Self::Started { generation }
            | Self::Settled { generation, .. }
            | Self::AdvanceDue { generation } => generation,
        }
    }

    fn kind(self) -> CompletionKind {
        match self {
            Self::Started { .. } => CompletionKind::SceneStarted,
            Self::Settled { .. } => CompletionKind::SceneSettled,
            Self::AdvanceDue { .. } => CompletionKind::AdvanceDue,
        }
    }

    /// The work that must still be outstanding for the completion to count.
    fn guarded_by(self) -> WorkKind {
        match self {
            Self::Started { .. } | Self::Settled { .. } => WorkKind::Narration,
            Self::AdvanceDue { .. } => WorkKind::AdvanceTimer,
        }
    }
}

/// Everything the scene task needs, moved into it at spawn time.
struct SceneJob {
    scene: SceneDefinition,
    generation: Generation,
    narrator: Arc<dyn Narrator>,
    stage: Arc<dyn Stage>,
    narration_cancel: CancellationToken,
    demo_cancel: CancellationToken,
    transition_delay: Duration,
    settle_timeout: Duration,
    completions: mpsc::UnboundedSender<Completion>,
}

impl SceneJob {
    async fn play(self) {
        let generation = self.generation;
        if !self.transition_delay.is_zero() {
            tokio::select! {
                () = self.narration_cancel.cancelled() => return,
                () = tokio::time::sleep(self.transition_delay) => {}
            }
        }
        if self
            .completions
            .send(Completion::Started { generation })
            .is_err()
        {
            return;
        }

        let (narration_done, narration_signal) = watch::channel(false);
        let narration = async {
            tokio::select! {
                biased;
                () = self.narration_cancel.cancelled() => {}
                () = self.narrator.speak(&self.scene.narration) => {}
            }
            narration_done.send_replace(true);
        };
        let demo = async {
            if let Some(script) = &self.scene.demo {
                let cx = DemoContext::new(
                    self.scene.index,
                    Arc::clone(&self.stage),
                    Arc::clone(&self.narrator),
                    self.demo_cancel.clone(),
                )
                .with_narration_signal(narration_signal);
                run_demo(script, &cx).await;
            }
        };
        let settled = tokio::time::timeout(self.settle_timeout, async {
            tokio::join!(narration, demo);
        })
        .await;

        let timed_out = settled.is_err() && !self.narration_cancel.is_cancelled();
        if timed_out {
            warn!(
                scene = %self.scene.index,
                %generation,
                timeout = ?self.settle_timeout,
                "scene did not settle in time, abandoning its work"
            );
            self.narration_cancel.cancel();
            self.demo_cancel.cancel();
            self.narrator.cancel();
        }
        // The sequencer may already be gone; nothing is left to notify.
        let _ = self.completions.send(Completion::Settled {
            generation,
            timed_out,
        });
    }
}

impl Sequencer {
    /// Starts a new generation for `scene` and spawns its narration and demo.
    ///
    /// `from` is the scene being left, if this entry is a navigation.
    pub(crate) fn enter_scene(
        &mut self,
        scene: SceneIndex,
        from: Option<SceneIndex>,
    ) -> Result<(), SequencerError> {
        let definition = self.registry.get(scene)?.clone();
        let generation = self.state.begin_generation();
        self.state.dwell = effective_duration(&definition, self.config.word_duration);
        self.state.phase = match from {
            Some(from) => ScenePhase::Advancing { from, to: scene },
            None => ScenePhase::Entering { scene },
        };

        let narration = CancelToken::issue(generation, WorkKind::Narration);
        let demo = definition
            .demo
            .is_some()
            .then(|| CancelToken::issue(generation, WorkKind::Demo));
        let job = SceneJob {
            generation,
            narrator: Arc::clone(&self.narrator),
            stage: Arc::clone(&self.stage),
            narration_cancel: narration.signal(),
            demo_cancel: demo
                .as_ref()
                .map_or_else(CancellationToken::new, CancelToken::signal),
            transition_delay: self.config.transition_delay,
            settle_timeout: self.config.settle_timeout,
            completions: self.completions.clone(),
            scene: definition,
        };
        self.state.register(narration);
        if let Some(demo) = demo {
            self.state.register(demo);
        }

        debug!(%scene, %generation, dwell = ?self.state.dwell, "entering scene");
        tokio::spawn(job.play());
        Ok(())
    }

    /// Applies a completion if its generation is still live; otherwise
    /// discards it without touching state.
    pub(crate) fn on_completion(&mut self, completion: Completion) {
        let generation = completion.generation();
        if let Err(error) = self.state.ensure_live(generation, completion.guarded_by()) {
            debug!(%error, completion = ?completion.kind(), "discarding stale completion");
            self.record(SequencerEventKind::StaleCompletionDiscarded {
                completion: completion.kind(),
                stale_generation: generation,
            });
            return;
        }

        match completion {
            Completion::Started { .. } => self.on_started(),
            Completion::Settled { timed_out, .. } => self.on_settled(timed_out),
            Completion::AdvanceDue { .. } => self.on_advance_due(),
        }
    }

    fn on_started(&mut self) {
        let scene = self.state.current_index;
        self.state.phase = ScenePhase::Entering { scene };
        info!(%scene, generation = %self.state.generation, "scene entered");
        self.record(SequencerEventKind::SceneEntered { scene });
    }

    fn on_settled(&mut self, timed_out: bool) {
        let scene = self.state.current_index;
        for token in self
            .state
            .take_kinds(&[WorkKind::Narration, WorkKind::Demo])
        {
            token.retire();
        }
        self.record(SequencerEventKind::SceneSettled { scene, timed_out });
        if self.state.playing {
            self.arm_advance_timer(scene, self.state.dwell);
        } else {
            // Settled while autoplay was paused; resuming arms the timer.
            self.state.phase = ScenePhase::Active { scene };
        }
    }

    /// Schedules the auto-advance of `scene` after `delay`.
    pub(crate) fn arm_advance_timer(&mut self, scene: SceneIndex, delay: Duration) {
        let generation = self.state.generation;
        let token = CancelToken::issue(generation, WorkKind::AdvanceTimer);
        let cancel = token.signal();
        let completions = self.completions.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    let _ = completions.send(Completion::AdvanceDue { generation });
                }
            }
        });
        self.state.register(token);
        self.state.phase = ScenePhase::Active { scene };

        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        debug!(%scene, %generation, delay_ms, "advance timer armed");
        self.record(SequencerEventKind::AdvanceTimerArmed { scene, delay_ms });
    }

    fn on_advance_due(&mut self) {
        let scene = self.state.current_index;
        for token in self.state.take_kinds(&[WorkKind::AdvanceTimer]) {
            token.retire();
        }
        self.record(SequencerEventKind::AdvanceTimerFired { scene });
        if let Err(error) = self.navigate(NavigationCommand::timer()) {
            warn!(%error, %scene, "auto-advance failed");
        }
    }
}
