//! Slidecast — scene sequencer.
//!
//! A single task owns the [`SequencerState`] and processes navigation
//! requests and the completions of scene work one at a time. Every scene
//! entry gets a fresh [`Generation`](slidecast_core::scene::Generation);
//! completions from older generations are discarded, so only the live scene
//! can arm an advance timer or move the current index.

pub mod cleanup;
pub mod config;
pub mod engine;
pub mod journal;
pub mod lifecycle;
pub mod navigation;
pub mod state;

pub use cleanup::CleanupCoordinator;
pub use config::SequencerConfig;
pub use engine::Presentation;
pub use journal::EventJournal;
pub use lifecycle::effective_duration;
pub use navigation::PresentationHandle;
pub use state::{ScenePhase, SequencerSnapshot, SequencerState};
