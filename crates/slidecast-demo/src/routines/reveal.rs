//! Reveal the items of a group with a stagger.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Demo;
use crate::context::{Cancelled, DemoContext};
use crate::stage::VisualChange;

/// Fades in `count` items one after another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    /// Group of items.
    pub group: String,
    /// Pause before the first item.
    #[serde(default)]
    pub lead_in_ms: u64,
    /// Number of items.
    pub count: usize,
    /// Pause between items.
    #[serde(default)]
    pub stagger_ms: u64,
    /// Pause after the last item.
    #[serde(default)]
    pub settle_ms: u64,
}

#[async_trait]
impl Demo for Reveal {
    fn name(&self) -> &'static str {
        "reveal"
    }

    async fn run(&self, cx: &DemoContext) -> Result<(), Cancelled> {
        cx.show(VisualChange::ConcealAll {
            group: self.group.clone(),
        })?;
        cx.pause(Duration::from_millis(self.lead_in_ms)).await?;
        for index in 0..self.count {
            cx.show(VisualChange::Reveal {
                group: self.group.clone(),
                index,
            })?;
            cx.pause(Duration::from_millis(self.stagger_ms)).await?;
        }
        cx.pause(Duration::from_millis(self.settle_ms)).await
    }

    fn reset(&self) -> Vec<VisualChange> {
        vec![VisualChange::ConcealAll {
            group: self.group.clone(),
        }]
    }

    fn validate(&self) -> Result<(), String> {
        if self.count == 0 {
            return Err(format!("reveal of `{}` has no items", self.group));
        }
        Ok(())
    }
}
