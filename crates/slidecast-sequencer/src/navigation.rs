//! The navigation surface.
//!
//! Every trigger (advance timer, click, key press, HTTP call) ends up in
//! [`Sequencer::navigate`], which cleans the current scene up, moves the
//! index and enters the new scene when playing.

use std::ops::ControlFlow;

use slidecast_core::cancel::WorkKind;
use slidecast_core::command::{Command, NavigationAction, NavigationCommand, Trigger};
use slidecast_core::error::SequencerError;
use slidecast_core::event::SequencerEventKind;
use slidecast_core::scene::SceneIndex;
use slidecast_demo::{NotificationLevel, VisualChange};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::engine::Sequencer;
use crate::state::{ScenePhase, SequencerSnapshot};

type Reply<T> = oneshot::Sender<Result<T, SequencerError>>;

/// A request sent to the sequencer task.
#[derive(Debug)]
pub(crate) enum Request {
    Navigate {
        command: NavigationCommand,
        reply: Reply<SequencerSnapshot>,
    },
    Snapshot {
        reply: oneshot::Sender<SequencerSnapshot>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Cloneable handle to a running presentation.
///
/// Requests are processed in the order they are sent. Every method fails
/// with `SequencerError::Stopped` once the presentation has shut down.
#[derive(Debug, Clone)]
pub struct PresentationHandle {
    requests: mpsc::Sender<Request>,
    scene_count: usize,
}

impl PresentationHandle {
    pub(crate) fn new(requests: mpsc::Sender<Request>, scene_count: usize) -> Self {
        Self {
            requests,
            scene_count,
        }
    }

    /// Number of scenes in the presentation.
    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.scene_count
    }

    /// Moves to the following scene, wrapping around.
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::Stopped` if the presentation has shut down.
    pub async fn next(&self) -> Result<SequencerSnapshot, SequencerError> {
        self.dispatch(NavigationCommand::user(NavigationAction::Next))
            .await
    }

    /// Moves to the preceding scene, wrapping around.
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::Stopped` if the presentation has shut down.
    pub async fn previous(&self) -> Result<SequencerSnapshot, SequencerError> {
        self.dispatch(NavigationCommand::user(NavigationAction::Previous))
            .await
    }

    /// Jumps to `index`.
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::OutOfRange` if `index` is not a scene of the
    /// presentation (state unchanged) and `SequencerError::Stopped` if the
    /// presentation has shut down.
    pub async fn goto(&self, index: SceneIndex) -> Result<SequencerSnapshot, SequencerError> {
        self.dispatch(NavigationCommand::user(NavigationAction::Goto(index)))
            .await
    }

    /// Switches autoplay off or on.
    ///
    /// With a narrator that supports pausing, turning autoplay off pauses
    /// the narration and cancels only the advance timer; turning it back on
    /// resumes where it stopped. Otherwise turning it off stops the scene
    /// and turning it on restarts it.
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::Stopped` if the presentation has shut down.
    pub async fn toggle_autoplay(&self) -> Result<SequencerSnapshot, SequencerError> {
        self.dispatch(NavigationCommand::user(NavigationAction::ToggleAutoplay))
            .await
    }

    /// Sends a navigation command and waits for the resulting state.
    ///
    /// # Errors
    ///
    /// Returns the error of the navigation, or `SequencerError::Stopped`.
    pub async fn dispatch(
        &self,
        command: NavigationCommand,
    ) -> Result<SequencerSnapshot, SequencerError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Navigate { command, reply })
            .await
            .map_err(|_| SequencerError::Stopped)?;
        response.await.map_err(|_| SequencerError::Stopped)?
    }

    /// Reads the current state.
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::Stopped` if the presentation has shut down.
    pub async fn snapshot(&self) -> Result<SequencerSnapshot, SequencerError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Snapshot { reply })
            .await
            .map_err(|_| SequencerError::Stopped)?;
        response.await.map_err(|_| SequencerError::Stopped)
    }

    /// Cleans up the current scene and stops the sequencer task.
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::Stopped` if the presentation had already
    /// shut down.
    pub async fn shutdown(&self) -> Result<(), SequencerError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Shutdown { reply })
            .await
            .map_err(|_| SequencerError::Stopped)?;
        response.await.map_err(|_| SequencerError::Stopped)
    }
}

impl Sequencer {
    /// Processes one request. Breaks once the presentation shut down.
    pub(crate) fn handle(&mut self, request: Request) -> ControlFlow<()> {
        match request {
            Request::Navigate { command, reply } => {
                let result = self.navigate(command);
                let _ = reply.send(result);
            }
            Request::Snapshot { reply } => {
                let _ = reply.send(self.state.snapshot());
            }
            Request::Shutdown { reply } => {
                self.close();
                let _ = reply.send(());
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Applies a navigation command.
    ///
    /// # Errors
    ///
    /// Returns `SequencerError::OutOfRange` for a goto outside the
    /// presentation, leaving the state unchanged.
    pub(crate) fn navigate(
        &mut self,
        command: NavigationCommand,
    ) -> Result<SequencerSnapshot, SequencerError> {
        let count = self.registry.count();
        let current = self.state.current_index;
        debug!(
            command = command.command_type(),
            correlation_id = %command.correlation_id(),
            trigger = ?command.trigger,
            "navigation requested"
        );

        let target = match command.action {
            NavigationAction::Next => current.next(count),
            NavigationAction::Previous => current.previous(count),
            NavigationAction::Goto(index) => {
                if !index.is_within(count) {
                    return Err(SequencerError::OutOfRange {
                        index: index.get(),
                        count,
                    });
                }
                if index == current && !self.state.phase.is_in_transition() {
                    debug!(scene = %index, "already on scene");
                    return Ok(self.state.snapshot());
                }
                index
            }
            NavigationAction::ToggleAutoplay => {
                self.state.correlation_id = command.correlation_id();
                self.toggle_autoplay()?;
                return Ok(self.state.snapshot());
            }
        };

        self.state.correlation_id = command.correlation_id();
        self.move_to(target, command.trigger)?;
        Ok(self.state.snapshot())
    }

    fn move_to(&mut self, target: SceneIndex, trigger: Trigger) -> Result<(), SequencerError> {
        let from = self.state.current_index;
        self.clean_up(from);
        self.state.current_index = target;
        self.stage.apply(VisualChange::SceneShown { scene: target });
        info!(%from, to = %target, ?trigger, playing = self.state.playing, "scene changed");
        self.record(SequencerEventKind::NavigationApplied {
            from,
            to: target,
            trigger,
        });

        if self.state.playing {
            self.enter_scene(target, (from != target).then_some(from))
        } else {
            self.state.phase = ScenePhase::Active { scene: target };
            Ok(())
        }
    }

    fn toggle_autoplay(&mut self) -> Result<(), SequencerError> {
        let scene = self.state.current_index;
        if self.state.playing {
            self.pause_autoplay(scene);
            Ok(())
        } else {
            self.resume_autoplay(scene)
        }
    }

    /// Stops auto-advancing. A narrator that can pause keeps the scene's
    /// narration and demo alive and only loses the advance timer; otherwise
    /// the scene is cleaned up.
    fn pause_autoplay(&mut self, scene: SceneIndex) {
        if self.narrator.pause() {
            for token in self.state.take_kinds(&[WorkKind::AdvanceTimer]) {
                token.cancel();
            }
            self.state.narration_paused = true;
            self.stage.apply(VisualChange::DismissNotifications);
        } else {
            self.clean_up(scene);
            self.state.phase = ScenePhase::Active { scene };
        }
        self.state.playing = false;
        info!(%scene, resumable = self.state.narration_paused, "autoplay paused");
        self.record(SequencerEventKind::AutoplayToggled { playing: false });
        self.notify("Autoplay paused");
    }

    /// Resumes paused narration and re-arms the advance timer once the scene
    /// has settled, or restarts the scene when nothing was paused.
    fn resume_autoplay(&mut self, scene: SceneIndex) -> Result<(), SequencerError> {
        let resuming = std::mem::take(&mut self.state.narration_paused);
        if resuming {
            self.stage.apply(VisualChange::DismissNotifications);
        } else {
            self.clean_up(scene);
        }
        self.state.playing = true;
        info!(%scene, resuming, "autoplay resumed");
        self.record(SequencerEventKind::AutoplayToggled { playing: true });
        self.notify("Autoplay resumed");

        if !resuming {
            return self.enter_scene(scene, None);
        }
        self.narrator.resume();
        if !self.state.has_outstanding(WorkKind::Narration) {
            self.arm_advance_timer(scene, self.state.dwell);
        }
        Ok(())
    }

    fn notify(&self, message: &str) {
        self.stage.apply(VisualChange::Notify {
            message: message.to_owned(),
            level: NotificationLevel::Info,
        });
    }
}
