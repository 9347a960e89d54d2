//! Count statistics up to their targets.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Demo;
use crate::context::{Cancelled, DemoContext};
use crate::stage::VisualChange;

fn default_frame_ms() -> u64 {
    50
}

/// How a counter value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterFormat {
    /// `95%`
    Percent,
    /// `$1.2M`
    Millions,
    /// `5000+`
    Plus,
}

impl CounterFormat {
    /// Renders `value`.
    #[must_use]
    pub fn render(self, value: f64) -> String {
        match self {
            Self::Percent => format!("{}%", value.round()),
            Self::Millions => format!("${value:.1}M"),
            Self::Plus => format!("{}+", value.round()),
        }
    }
}

/// One animated statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    /// Element showing the value.
    pub element: String,
    /// Final value.
    pub target: f64,
    /// Rendering.
    pub format: CounterFormat,
    /// Time to count from zero to the target.
    pub duration_ms: u64,
}

/// Counts several statistics up, one after another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counters {
    /// Pause before the first counter starts.
    #[serde(default)]
    pub lead_in_ms: u64,
    /// Interval between displayed values.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Pause after the last counter reaches its target.
    #[serde(default)]
    pub settle_ms: u64,
    /// Counters in order.
    pub counters: Vec<Counter>,
}

impl Counters {
    async fn count_up(&self, cx: &DemoContext, counter: &Counter) -> Result<(), Cancelled> {
        let frames = (counter.duration_ms / self.frame_ms).max(1);
        for frame in 1..=frames {
            #[allow(clippy::cast_precision_loss)]
            let value = counter.target * frame as f64 / frames as f64;
            cx.show(VisualChange::SetText {
                element: counter.element.clone(),
                text: counter.format.render(value),
            })?;
            cx.pause(Duration::from_millis(self.frame_ms)).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Demo for Counters {
    fn name(&self) -> &'static str {
        "counters"
    }

    async fn run(&self, cx: &DemoContext) -> Result<(), Cancelled> {
        cx.pause(Duration::from_millis(self.lead_in_ms)).await?;
        for counter in &self.counters {
            self.count_up(cx, counter).await?;
        }
        cx.pause(Duration::from_millis(self.settle_ms)).await
    }

    fn reset(&self) -> Vec<VisualChange> {
        self.counters
            .iter()
            .map(|c| VisualChange::SetText {
                element: c.element.clone(),
                text: c.format.render(0.0),
            })
            .collect()
    }

    fn validate(&self) -> Result<(), String> {
        if self.frame_ms == 0 {
            return Err("counters need a non-zero frame_ms".to_owned());
        }
        if self.counters.is_empty() {
            return Err("counters list is empty".to_owned());
        }
        Ok(())
    }
}
