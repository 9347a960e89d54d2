//! Per-scene context handed to demo routines.

use std::sync::Arc;
use std::time::Duration;

use slidecast_core::scene::SceneIndex;
use slidecast_narration::Narrator;
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::stage::{Stage, VisualChange};

/// The scene owning a demo was left; the demo must stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("demo cancelled")]
pub struct Cancelled;

/// Everything a demo routine may touch.
///
/// Every operation first checks the cancel token, so a routine written as a
/// chain of `?`-propagated steps stops at the first boundary after its scene
/// is left.
#[derive(Clone)]
pub struct DemoContext {
    scene: SceneIndex,
    stage: Arc<dyn Stage>,
    narrator: Arc<dyn Narrator>,
    cancel: CancellationToken,
    narration_done: watch::Receiver<bool>,
}

impl DemoContext {
    /// Creates a context whose scene narration counts as already finished.
    #[must_use]
    pub fn new(
        scene: SceneIndex,
        stage: Arc<dyn Stage>,
        narrator: Arc<dyn Narrator>,
        cancel: CancellationToken,
    ) -> Self {
        let (_done, narration_done) = watch::channel(true);
        Self {
            scene,
            stage,
            narrator,
            cancel,
            narration_done,
        }
    }

    /// Ties [`await_narration`](Self::await_narration) to the scene's
    /// narration, signalled by `true` on `narration_done`.
    #[must_use]
    pub fn with_narration_signal(mut self, narration_done: watch::Receiver<bool>) -> Self {
        self.narration_done = narration_done;
        self
    }

    /// The scene this demo belongs to.
    #[must_use]
    pub fn scene(&self) -> SceneIndex {
        self.scene
    }

    /// Whether the scene has been left.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn check(&self) -> Result<(), Cancelled> {
        if self.cancel.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Applies a visual change unless cancelled.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if the scene has been left.
    pub fn show(&self, change: VisualChange) -> Result<(), Cancelled> {
        self.check()?;
        self.stage.apply(change);
        Ok(())
    }

    /// Waits for `duration`, returning early if cancelled.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if the scene is left before or during the wait.
    pub async fn pause(&self, duration: Duration) -> Result<(), Cancelled> {
        self.check()?;
        if duration.is_zero() {
            return Ok(());
        }
        tokio::select! {
            () = self.cancel.cancelled() => Err(Cancelled),
            () = tokio::time::sleep(duration) => Ok(()),
        }
    }

    /// Speaks a narration segment, superseding the current utterance.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if the scene is left before or while speaking.
    pub async fn speak(&self, text: &str) -> Result<(), Cancelled> {
        self.check()?;
        tokio::select! {
            () = self.cancel.cancelled() => return Err(Cancelled),
            () = self.narrator.speak(text) => {}
        }
        self.check()
    }

    /// Waits until the scene's own narration has finished.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if the scene is left first.
    pub async fn await_narration(&self) -> Result<(), Cancelled> {
        let mut done = self.narration_done.clone();
        loop {
            self.check()?;
            if *done.borrow_and_update() {
                return Ok(());
            }
            tokio::select! {
                () = self.cancel.cancelled() => return Err(Cancelled),
                changed = done.changed() => {
                    if changed.is_err() {
                        return Ok(());
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for DemoContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoContext")
            .field("scene", &self.scene)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}
