//! Slidecast — scene demos.
//!
//! A demo is a scripted sequence of [`VisualChange`]s and timed pauses that
//! plays alongside a scene's narration. Demos only talk to the [`Stage`];
//! they never see sequencer state. Each one observes its cancel token at
//! every pause and stops early when the scene is left.

pub mod board;
pub mod context;
pub mod routines;
pub mod runner;
pub mod script;
pub mod stage;

pub use board::{StageBoard, StageSnapshot};
pub use context::{Cancelled, DemoContext};
pub use routines::Demo;
pub use runner::{reset_stage, run_demo};
pub use script::DemoScript;
pub use stage::{
    Animation, NotificationLevel, Speaker, Stage, StageFanout, TracingStage, VisualChange,
};
