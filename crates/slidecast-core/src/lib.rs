//! Slidecast Core — shared abstractions for the scene sequencer.
//!
//! This crate defines the identifiers, errors, commands, events and
//! cancellation handles that every other Slidecast crate depends on. It
//! contains no scheduling or I/O code.

pub mod cancel;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod scene;
pub mod sink;
