//! Sequencer error types.

use thiserror::Error;

use crate::scene::Generation;

/// Errors raised by the scene sequencer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencerError {
    /// A scene index outside `0..count` was requested.
    #[error("scene index {index} is out of range for a presentation of {count} scenes")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of scenes in the presentation.
        count: usize,
    },

    /// A completion arrived from a superseded scene entry.
    ///
    /// Internal signal only. Callers discard the completion and never
    /// surface it to users.
    #[error("completion from generation {generation} superseded by generation {current}")]
    StaleGeneration {
        /// Generation the completion belongs to.
        generation: Generation,
        /// Generation currently live.
        current: Generation,
    },

    /// The sequencer task is no longer running.
    #[error("sequencer has stopped")]
    Stopped,
}
