//! Narration error types.

use thiserror::Error;

/// Failures of a speech engine.
///
/// None of these escape [`Narrator::speak`](crate::Narrator::speak): they are
/// logged and the utterance counts as finished.
#[derive(Debug, Error)]
pub enum NarratorError {
    /// The speech engine could not be started.
    #[error("speech engine `{program}` unavailable: {reason}")]
    Unavailable {
        /// Program that failed to start.
        program: String,
        /// Why it failed.
        reason: String,
    },

    /// The speech engine exited unsuccessfully.
    #[error("speech engine exited with {status}")]
    Failed {
        /// Exit status as reported by the OS.
        status: String,
    },

    /// Waiting on the speech engine failed.
    #[error("speech engine I/O error: {0}")]
    Io(#[from] std::io::Error),
}
