//! Deterministic narration length estimate.

use std::time::Duration;

/// Time budgeted per spoken word when no other value is configured.
pub const DEFAULT_WORD_DURATION: Duration = Duration::from_millis(150);

/// Estimates how long `text` takes to speak at `per_word` per word.
///
/// Only used as a dwell-time floor; the sequencer still waits for the real
/// narration to finish.
#[must_use]
pub fn estimated_duration(text: &str, per_word: Duration) -> Duration {
    let words = u32::try_from(text.split_whitespace().count()).unwrap_or(u32::MAX);
    per_word.saturating_mul(words)
}
