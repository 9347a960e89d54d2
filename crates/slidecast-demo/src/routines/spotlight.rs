//! Highlight the items of a group one after another, narrating each.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Demo;
use crate::context::{Cancelled, DemoContext};
use crate::stage::VisualChange;

/// One highlighted item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotlightStep {
    /// Item to highlight.
    pub item: String,
    /// Narration spoken before the highlight.
    #[serde(default)]
    pub narration: Option<String>,
    /// Time the highlight is held.
    #[serde(default)]
    pub hold_ms: u64,
}

/// Walks through a group, starting once the scene's narration has ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spotlight {
    /// Group whose items are highlighted.
    pub group: String,
    /// Pause after the scene narration, before the first step.
    #[serde(default)]
    pub lead_in_ms: u64,
    /// Items in order.
    pub steps: Vec<SpotlightStep>,
    /// Narration spoken after the last step.
    #[serde(default)]
    pub outro: Option<String>,
}

#[async_trait]
impl Demo for Spotlight {
    fn name(&self) -> &'static str {
        "spotlight"
    }

    async fn run(&self, cx: &DemoContext) -> Result<(), Cancelled> {
        cx.await_narration().await?;
        cx.pause(Duration::from_millis(self.lead_in_ms)).await?;

        for step in &self.steps {
            if let Some(narration) = &step.narration {
                cx.speak(narration).await?;
            }
            cx.show(VisualChange::Highlight {
                group: self.group.clone(),
                item: step.item.clone(),
            })?;
            cx.pause(Duration::from_millis(step.hold_ms)).await?;
        }

        if let Some(outro) = &self.outro {
            cx.speak(outro).await?;
        }
        cx.show(VisualChange::ClearHighlights {
            group: self.group.clone(),
        })
    }

    fn reset(&self) -> Vec<VisualChange> {
        vec![VisualChange::ClearHighlights {
            group: self.group.clone(),
        }]
    }

    fn validate(&self) -> Result<(), String> {
        if self.steps.is_empty() {
            return Err(format!("spotlight on `{}` has no steps", self.group));
        }
        Ok(())
    }
}
