//! Shared test doubles and fixtures for the Slidecast scene sequencer.

mod clock;
mod narrator;
mod scenes;
mod sink;
mod stage;

pub use clock::FixedClock;
pub use narrator::ScriptedNarrator;
pub use scenes::{registry, scene};
pub use sink::RecordingSink;
pub use stage::RecordingStage;
