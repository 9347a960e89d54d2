//! Content loading errors.

use thiserror::Error;

/// Problems found while loading a scene table.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The table is not valid YAML or does not match the schema.
    #[error("scene table could not be parsed: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The scene table file could not be read.
    #[error("scene table could not be read: {0}")]
    Io(#[from] std::io::Error),

    /// The table defines no scenes.
    #[error("scene table defines no scenes")]
    Empty,

    /// A scene's index does not match its position in the table.
    #[error("scene at position {position} carries index {index}")]
    NonContiguous {
        /// Position in the table.
        position: usize,
        /// Index the scene carries.
        index: usize,
    },

    /// A scene's demo script cannot be played.
    #[error("scene {index} has an invalid demo: {reason}")]
    InvalidDemo {
        /// Offending scene.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },
}
