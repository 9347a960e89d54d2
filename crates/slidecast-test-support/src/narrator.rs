//! Test narrator — a narrator whose timing is set by the test.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use slidecast_narration::{Narrator, UtteranceSlot};

/// A narrator that takes a fixed time per utterance, or never finishes.
///
/// Records every text it was asked to speak and every `cancel` call.
/// Cancellation and superseding resolve the outstanding `speak` the same way
/// real narrators do.
#[derive(Debug)]
pub struct ScriptedNarrator {
    duration: Option<Duration>,
    slot: UtteranceSlot,
    spoken: Mutex<Vec<String>>,
    cancels: AtomicUsize,
    pausable: bool,
}

impl ScriptedNarrator {
    /// A narrator that finishes every utterance after `duration`.
    #[must_use]
    pub fn taking(duration: Duration) -> Self {
        Self::with_duration(Some(duration))
    }

    /// A narrator that finishes every utterance immediately.
    #[must_use]
    pub fn instant() -> Self {
        Self::with_duration(Some(Duration::ZERO))
    }

    /// A narrator whose utterances only end when cancelled.
    #[must_use]
    pub fn hanging() -> Self {
        Self::with_duration(None)
    }

    fn with_duration(duration: Option<Duration>) -> Self {
        Self {
            duration,
            slot: UtteranceSlot::default(),
            spoken: Mutex::new(Vec::new()),
            cancels: AtomicUsize::new(0),
            pausable: false,
        }
    }

    /// Reports pause and resume as supported. Utterances keep their timing
    /// while paused.
    #[must_use]
    pub fn pausable(mut self) -> Self {
        self.pausable = true;
        self
    }

    /// Texts passed to `speak`, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

    /// Number of `cancel` calls.
    pub fn cancel_count(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Narrator for ScriptedNarrator {
    async fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_owned());
        let utterance = self.slot.begin(text);
        match self.duration {
            Some(duration) => {
                tokio::select! {
                    () = utterance.token.cancelled() => {}
                    () = tokio::time::sleep(duration) => {}
                }
            }
            None => utterance.token.cancelled().await,
        }
        self.slot.finish(utterance.id);
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
        self.slot.cancel();
    }

    fn pause(&self) -> bool {
        self.pausable
    }

    fn resume(&self) -> bool {
        self.pausable
    }
}
