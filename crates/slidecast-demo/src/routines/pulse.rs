//! Move one element and return it to rest.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Demo;
use crate::context::{Cancelled, DemoContext};
use crate::stage::{Animation, VisualChange};

/// A single motion, e.g. a chart line ticking up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pulse {
    /// Element to move.
    pub element: String,
    /// Pause before the motion starts.
    #[serde(default)]
    pub lead_in_ms: u64,
    /// Direction of the motion.
    pub animation: Animation,
    /// How long the motion is held.
    pub duration_ms: u64,
}

#[async_trait]
impl Demo for Pulse {
    fn name(&self) -> &'static str {
        "pulse"
    }

    async fn run(&self, cx: &DemoContext) -> Result<(), Cancelled> {
        cx.pause(Duration::from_millis(self.lead_in_ms)).await?;
        cx.show(VisualChange::Animate {
            element: self.element.clone(),
            animation: self.animation,
        })?;
        cx.pause(Duration::from_millis(self.duration_ms)).await?;
        cx.show(VisualChange::Animate {
            element: self.element.clone(),
            animation: Animation::Rest,
        })
    }

    fn reset(&self) -> Vec<VisualChange> {
        vec![VisualChange::Animate {
            element: self.element.clone(),
            animation: Animation::Rest,
        }]
    }

    fn validate(&self) -> Result<(), String> {
        if self.animation == Animation::Rest {
            return Err(format!("pulse on `{}` must move up or down", self.element));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::routines::testing::context;

    #[tokio::test(start_paused = true)]
    async fn test_pulse_returns_element_to_rest() {
        let (recorder, cx) = context(CancellationToken::new());
        let pulse = Pulse {
            element: "price-line".into(),
            lead_in_ms: 1000,
            animation: Animation::Up,
            duration_ms: 3000,
        };

        pulse.run(&cx).await.unwrap();

        assert_eq!(
            recorder.changes(),
            vec![
                VisualChange::Animate {
                    element: "price-line".into(),
                    animation: Animation::Up
                },
                VisualChange::Animate {
                    element: "price-line".into(),
                    animation: Animation::Rest
                },
            ]
        );
    }
}
