//! Demo routines.
//!
//! Each routine is a plain data description (deserialized from the scene
//! table) plus a [`Demo`] implementation that plays it.

use async_trait::async_trait;

use crate::context::{Cancelled, DemoContext};
use crate::stage::VisualChange;

pub mod counters;
pub mod exchange;
pub mod pulse;
pub mod reveal;
pub mod spotlight;

pub use counters::{Counter, CounterFormat, Counters};
pub use exchange::{Exchange, Turn};
pub use pulse::Pulse;
pub use reveal::Reveal;
pub use spotlight::{Spotlight, SpotlightStep};

/// A scripted, cancellable demo.
#[async_trait]
pub trait Demo: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Plays the demo to completion.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` as soon as the context reports cancellation at a
    /// step boundary.
    async fn run(&self, cx: &DemoContext) -> Result<(), Cancelled>;

    /// Changes that put the stage back into the demo's initial condition.
    fn reset(&self) -> Vec<VisualChange>;

    /// Checks the script for values the routine cannot play.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
