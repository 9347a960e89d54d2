//! A scripted dialogue written into a transcript element.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Demo;
use crate::context::{Cancelled, DemoContext};
use crate::stage::{Speaker, VisualChange};

/// One line of the dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who speaks.
    pub speaker: Speaker,
    /// What is said.
    pub text: String,
    /// Typing indicator shown before the line appears.
    #[serde(default)]
    pub typing_ms: u64,
    /// Pause after the line appears.
    #[serde(default)]
    pub hold_ms: u64,
}

/// Plays a dialogue such as an assistant chat or a voice command session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// Transcript element.
    pub element: String,
    /// Pause before the first line.
    #[serde(default)]
    pub lead_in_ms: u64,
    /// Dialogue lines in order.
    pub turns: Vec<Turn>,
    /// Empty the transcript after the last line.
    #[serde(default)]
    pub clear_after: bool,
}

#[async_trait]
impl Demo for Exchange {
    fn name(&self) -> &'static str {
        "exchange"
    }

    async fn run(&self, cx: &DemoContext) -> Result<(), Cancelled> {
        cx.show(VisualChange::ClearElement {
            element: self.element.clone(),
        })?;
        cx.pause(Duration::from_millis(self.lead_in_ms)).await?;

        for turn in &self.turns {
            if turn.typing_ms > 0 {
                cx.show(VisualChange::Typing {
                    element: self.element.clone(),
                    active: true,
                })?;
                cx.pause(Duration::from_millis(turn.typing_ms)).await?;
                cx.show(VisualChange::Typing {
                    element: self.element.clone(),
                    active: false,
                })?;
            }
            cx.show(VisualChange::AppendLine {
                element: self.element.clone(),
                speaker: turn.speaker,
                text: turn.text.clone(),
            })?;
            cx.pause(Duration::from_millis(turn.hold_ms)).await?;
        }

        if self.clear_after {
            cx.show(VisualChange::ClearElement {
                element: self.element.clone(),
            })?;
        }
        Ok(())
    }

    fn reset(&self) -> Vec<VisualChange> {
        vec![VisualChange::ClearElement {
            element: self.element.clone(),
        }]
    }

    fn validate(&self) -> Result<(), String> {
        if self.turns.is_empty() {
            return Err(format!("exchange in `{}` has no turns", self.element));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::routines::testing::context;

    #[tokio::test(start_paused = true)]
    async fn test_assistant_turn_shows_typing_indicator_first() {
        // Arrange
        let (recorder, cx) = context(CancellationToken::new());
        let exchange = Exchange {
            element: "chat".into(),
            lead_in_ms: 1000,
            turns: vec![
                Turn {
                    speaker: Speaker::User,
                    text: "How do alerts work?".into(),
                    typing_ms: 0,
                    hold_ms: 1500,
                },
                Turn {
                    speaker: Speaker::Assistant,
                    text: "You pick a threshold.".into(),
                    typing_ms: 2000,
                    hold_ms: 3000,
                },
            ],
            clear_after: false,
        };
        let started = Instant::now();

        // Act
        exchange.run(&cx).await.unwrap();

        // Assert
        assert_eq!(started.elapsed(), Duration::from_millis(7500));
        let changes = recorder.changes();
        assert_eq!(changes.len(), 5);
        assert!(matches!(&changes[0], VisualChange::ClearElement { .. }));
        assert!(matches!(
            &changes[1],
            VisualChange::AppendLine { speaker: Speaker::User, .. }
        ));
        assert!(matches!(&changes[2], VisualChange::Typing { active: true, .. }));
        assert!(matches!(&changes[3], VisualChange::Typing { active: false, .. }));
        assert!(matches!(
            &changes[4],
            VisualChange::AppendLine { speaker: Speaker::Assistant, .. }
        ));
    }

    #[tokio::test]
    async fn test_cancelled_exchange_changes_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let (recorder, cx) = context(cancel);
        let exchange = Exchange {
            element: "chat".into(),
            lead_in_ms: 0,
            turns: vec![Turn {
                speaker: Speaker::User,
                text: "hi".into(),
                typing_ms: 0,
                hold_ms: 0,
            }],
            clear_after: true,
        };

        assert_eq!(exchange.run(&cx).await, Err(Cancelled));
        assert!(recorder.changes().is_empty());
    }
}
