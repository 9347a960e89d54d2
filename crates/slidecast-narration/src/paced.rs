//! Simulated narration paced word by word.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::narrator::{Narrator, UtteranceSlot};

/// A narrator that "speaks" by waiting one word duration per word.
///
/// Used when no speech engine is installed: scenes keep their natural
/// rhythm and the current caption can be shown instead of audio. Supports
/// pause and resume between words.
#[derive(Debug)]
pub struct PacedNarrator {
    word_duration: Duration,
    slot: UtteranceSlot,
    paused: watch::Sender<bool>,
}

impl PacedNarrator {
    /// Creates a narrator spending `word_duration` on every word.
    #[must_use]
    pub fn new(word_duration: Duration) -> Self {
        Self {
            word_duration,
            slot: UtteranceSlot::default(),
            paused: watch::Sender::new(false),
        }
    }

    /// Text currently being spoken.
    #[must_use]
    pub fn caption(&self) -> Option<String> {
        self.slot.current_text()
    }

    /// Whether narration is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        *self.paused.borrow()
    }

    /// Waits out one word, honouring pause. Returns `false` when cancelled.
    async fn speak_word(&self, token: &CancellationToken) -> bool {
        let mut paused = self.paused.subscribe();
        while *paused.borrow_and_update() {
            tokio::select! {
                () = token.cancelled() => return false,
                changed = paused.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        tokio::select! {
            () = token.cancelled() => false,
            () = tokio::time::sleep(self.word_duration) => true,
        }
    }
}

#[async_trait]
impl Narrator for PacedNarrator {
    async fn speak(&self, text: &str) {
        let utterance = self.slot.begin(text);
        let words = text.split_whitespace().count();
        debug!(utterance = utterance.id, words, "narration started");

        let mut completed = true;
        for _ in 0..words {
            if !self.speak_word(&utterance.token).await {
                completed = false;
                break;
            }
        }

        self.slot.finish(utterance.id);
        debug!(utterance = utterance.id, completed, "narration ended");
    }

    fn cancel(&self) {
        self.slot.cancel();
        self.paused.send_replace(false);
    }

    fn pause(&self) -> bool {
        self.paused.send_replace(true);
        true
    }

    fn resume(&self) -> bool {
        self.paused.send_replace(false);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::time::{Instant, sleep};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_speak_takes_one_word_duration_per_word() {
        let narrator = PacedNarrator::new(Duration::from_millis(100));
        let started = Instant::now();

        narrator.speak("three short words").await;

        assert_eq!(started.elapsed(), Duration::from_millis(300));
        assert!(narrator.caption().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_resolves_outstanding_speak() {
        let narrator = Arc::new(PacedNarrator::new(Duration::from_secs(1)));
        let speaking = {
            let narrator = Arc::clone(&narrator);
            tokio::spawn(async move { narrator.speak("a very long sentence indeed").await })
        };
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(narrator.caption().as_deref(), Some("a very long sentence indeed"));

        let cancelled_at = Instant::now();
        narrator.cancel();
        speaking.await.unwrap();

        assert_eq!(cancelled_at.elapsed(), Duration::ZERO);
        assert!(narrator.caption().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_utterance_supersedes_previous() {
        let narrator = Arc::new(PacedNarrator::new(Duration::from_secs(1)));
        let first = {
            let narrator = Arc::clone(&narrator);
            tokio::spawn(async move { narrator.speak("first utterance here").await })
        };
        sleep(Duration::from_millis(500)).await;

        let second = {
            let narrator = Arc::clone(&narrator);
            tokio::spawn(async move { narrator.speak("second").await })
        };
        first.await.unwrap();

        assert_eq!(narrator.caption().as_deref(), Some("second"));
        second.await.unwrap();
        assert!(narrator.caption().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_holds_narration_until_resume() {
        let narrator = Arc::new(PacedNarrator::new(Duration::from_millis(100)));
        let started = Instant::now();
        let speaking = {
            let narrator = Arc::clone(&narrator);
            tokio::spawn(async move { narrator.speak("one two three four").await })
        };
        sleep(Duration::from_millis(150)).await;

        assert!(narrator.pause());
        assert!(narrator.is_paused());
        sleep(Duration::from_secs(5)).await;
        assert!(!speaking.is_finished());

        assert!(narrator.resume());
        speaking.await.unwrap();

        assert_eq!(started.elapsed(), Duration::from_millis(5350));
    }
}
