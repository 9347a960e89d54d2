//! Generation-scoped cancel tokens.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::scene::Generation;

/// The kind of work a [`CancelToken`] guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkKind {
    /// A scene's narration.
    Narration,
    /// A scene's demo routine.
    Demo,
    /// The timer that advances to the next scene.
    AdvanceTimer,
}

/// Handle correlating one scheduled activity with the generation that
/// scheduled it.
///
/// Not `Clone`: a token is consumed by [`cancel`](Self::cancel) or
/// [`retire`](Self::retire) and can never be reused. The activity itself
/// observes cancellation through the signal returned by
/// [`signal`](Self::signal).
#[derive(Debug)]
pub struct CancelToken {
    generation: Generation,
    kind: WorkKind,
    signal: CancellationToken,
}

impl CancelToken {
    /// Issues a fresh token for work of `kind` under `generation`.
    #[must_use]
    pub fn issue(generation: Generation, kind: WorkKind) -> Self {
        Self {
            generation,
            kind,
            signal: CancellationToken::new(),
        }
    }

    /// Generation that scheduled the work.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Kind of work guarded.
    #[must_use]
    pub fn kind(&self) -> WorkKind {
        self.kind
    }

    /// The signal handed to the scheduled activity.
    #[must_use]
    pub fn signal(&self) -> CancellationToken {
        self.signal.clone()
    }

    /// Cancels the work and consumes the token.
    pub fn cancel(self) {
        self.signal.cancel();
    }

    /// Consumes the token after the work completed on its own.
    pub fn retire(self) {
        drop(self);
    }
}
