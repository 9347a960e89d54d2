//! The narrator contract and the utterance bookkeeping shared by
//! implementations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Speech capability used by the sequencer.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Speaks `text`, returning once narration ends or is cancelled.
    ///
    /// Starting a new utterance cancels the previous one. Never fails: an
    /// unavailable engine resolves immediately.
    async fn speak(&self, text: &str);

    /// Stops the current utterance, if any. Idempotent.
    fn cancel(&self);

    /// Pauses the current utterance. Returns `false` if unsupported.
    fn pause(&self) -> bool {
        false
    }

    /// Resumes a paused utterance. Returns `false` if unsupported.
    fn resume(&self) -> bool {
        false
    }
}

/// A narrator with no speech engine; every utterance takes no time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNarrator;

#[async_trait]
impl Narrator for SilentNarrator {
    async fn speak(&self, text: &str) {
        tracing::trace!(chars = text.len(), "silent narrator skipped utterance");
    }

    fn cancel(&self) {}
}

/// One in-flight utterance.
#[derive(Debug, Clone)]
pub struct Utterance {
    /// Slot-local identifier.
    pub id: u64,
    /// Text being spoken.
    pub text: String,
    /// Cancelled when the utterance is superseded or cancelled.
    pub token: CancellationToken,
}

/// Tracks the single active utterance of a narrator.
#[derive(Debug, Default)]
pub struct UtteranceSlot {
    next_id: AtomicU64,
    current: Mutex<Option<Utterance>>,
}

impl UtteranceSlot {
    fn lock(&self) -> MutexGuard<'_, Option<Utterance>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a new utterance, cancelling whichever one was active.
    pub fn begin(&self, text: &str) -> Utterance {
        let utterance = Utterance {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            text: text.to_owned(),
            token: CancellationToken::new(),
        };
        if let Some(previous) = self.lock().replace(utterance.clone()) {
            previous.token.cancel();
        }
        utterance
    }

    /// Cancels the active utterance. Idempotent.
    pub fn cancel(&self) {
        if let Some(current) = self.lock().take() {
            current.token.cancel();
        }
    }

    /// Clears the slot if `id` is still the active utterance.
    pub fn finish(&self, id: u64) {
        let mut current = self.lock();
        if current.as_ref().is_some_and(|u| u.id == id) {
            *current = None;
        }
    }

    /// Text of the active utterance.
    #[must_use]
    pub fn current_text(&self) -> Option<String> {
        self.lock().as_ref().map(|u| u.text.clone())
    }
}
