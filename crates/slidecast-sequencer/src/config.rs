//! Sequencer timing configuration.

use std::time::Duration;

use slidecast_narration::DEFAULT_WORD_DURATION;

/// Time a slide transition takes before a scene's narration starts.
pub const DEFAULT_TRANSITION_DELAY: Duration = Duration::from_millis(700);

/// Longest a scene may take to settle before its work is abandoned.
pub const DEFAULT_SETTLE_TIMEOUT: Duration = Duration::from_secs(120);

/// Behaviour knobs of a presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerConfig {
    /// Whether playback starts immediately.
    pub autoplay: bool,
    /// Per-word unit of the narration estimate.
    pub word_duration: Duration,
    /// Pause between showing a scene and starting its narration.
    pub transition_delay: Duration,
    /// Settle watchdog.
    pub settle_timeout: Duration,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            word_duration: DEFAULT_WORD_DURATION,
            transition_delay: DEFAULT_TRANSITION_DELAY,
            settle_timeout: DEFAULT_SETTLE_TIMEOUT,
        }
    }
}
