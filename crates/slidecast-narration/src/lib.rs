//! Slidecast — narration.
//!
//! A [`Narrator`] turns scene text into speech. The sequencer only relies on
//! the contract of the trait: one utterance at a time, cancellation resolves
//! the outstanding `speak` future, and an unavailable speech engine behaves
//! like instantaneous narration.

pub mod error;
pub mod estimate;
pub mod narrator;
pub mod paced;
pub mod process;
pub mod voice;

pub use estimate::{DEFAULT_WORD_DURATION, estimated_duration};
pub use narrator::{Narrator, SilentNarrator, Utterance, UtteranceSlot};
pub use paced::PacedNarrator;
pub use process::{ProcessNarrator, ProcessNarratorConfig, SpeechProfile};
pub use voice::{Voice, VoicePolicy, parse_espeak_voices};
