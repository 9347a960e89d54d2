//! Keyboard navigation from a line-based terminal.
//!
//! | key                    | action                |
//! |------------------------|-----------------------|
//! | `n`, `l`, `right`      | next scene            |
//! | `p`, `h`, `left`       | previous scene        |
//! | space, `k`, `play`     | toggle autoplay       |
//! | `1`..=`N`              | jump to scene N       |
//! | `q`, `quit`            | stop the presentation |

use slidecast_core::command::NavigationAction;
use slidecast_core::scene::SceneIndex;
use slidecast_sequencer::PresentationHandle;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Navigate the presentation.
    Navigate(NavigationAction),
    /// Stop the presentation and the server.
    Quit,
}

/// Maps one input line to a command. Unknown keys and scene numbers outside
/// `1..=scene_count` map to nothing.
#[must_use]
pub fn parse_key(line: &str, scene_count: usize) -> Option<KeyCommand> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line == " " {
        return Some(KeyCommand::Navigate(NavigationAction::ToggleAutoplay));
    }
    let key = line.trim().to_ascii_lowercase();
    let action = match key.as_str() {
        "n" | "l" | "right" => NavigationAction::Next,
        "p" | "h" | "left" => NavigationAction::Previous,
        "k" | "space" | "play" => NavigationAction::ToggleAutoplay,
        "q" | "quit" => return Some(KeyCommand::Quit),
        number => {
            let position: usize = number.parse().ok()?;
            if position == 0 || position > scene_count {
                return None;
            }
            NavigationAction::Goto(SceneIndex(position - 1))
        }
    };
    Some(KeyCommand::Navigate(action))
}

/// Reads keys from `input` until it ends, `q` is pressed or `shutdown` is
/// cancelled. Pressing `q` cancels `shutdown`.
pub async fn run_keyboard<R>(input: R, presentation: PresentationHandle, shutdown: CancellationToken)
where
    R: AsyncBufRead + Unpin,
{
    let scene_count = presentation.scene_count();
    let mut lines = input.lines();
    info!(scene_count, "keyboard navigation ready");
    loop {
        let line = tokio::select! {
            () = shutdown.cancelled() => break,
            line = lines.next_line() => line,
        };
        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(error) => {
                warn!(%error, "keyboard input failed");
                break;
            }
        };

        match parse_key(&line, scene_count) {
            Some(KeyCommand::Navigate(action)) => {
                let result = match action {
                    NavigationAction::Next => presentation.next().await,
                    NavigationAction::Previous => presentation.previous().await,
                    NavigationAction::Goto(index) => presentation.goto(index).await,
                    NavigationAction::ToggleAutoplay => presentation.toggle_autoplay().await,
                };
                match result {
                    Ok(snapshot) => debug!(
                        scene = %snapshot.current_index,
                        playing = snapshot.playing,
                        "key applied"
                    ),
                    Err(error) => {
                        warn!(%error, "key rejected");
                    }
                }
            }
            Some(KeyCommand::Quit) => {
                info!("quit requested from keyboard");
                shutdown.cancel();
                break;
            }
            None => debug!(key = line.trim(), "unbound key"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use slidecast_demo::StageBoard;
    use slidecast_sequencer::{Presentation, SequencerConfig};
    use slidecast_test_support::{ScriptedNarrator, registry};

    use super::*;

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            parse_key("n", 3),
            Some(KeyCommand::Navigate(NavigationAction::Next))
        );
        assert_eq!(
            parse_key("Right\n", 3),
            Some(KeyCommand::Navigate(NavigationAction::Next))
        );
        assert_eq!(
            parse_key("h", 3),
            Some(KeyCommand::Navigate(NavigationAction::Previous))
        );
        assert_eq!(
            parse_key(" ", 3),
            Some(KeyCommand::Navigate(NavigationAction::ToggleAutoplay))
        );
        assert_eq!(parse_key("q", 3), Some(KeyCommand::Quit));
    }

    #[test]
    fn test_number_keys_jump_to_scene() {
        assert_eq!(
            parse_key("3", 3),
            Some(KeyCommand::Navigate(NavigationAction::Goto(SceneIndex(2))))
        );
        assert_eq!(parse_key("0", 3), None);
        assert_eq!(parse_key("4", 3), None);
    }

    #[test]
    fn test_unbound_keys_map_to_nothing() {
        assert_eq!(parse_key("", 3), None);
        assert_eq!(parse_key("x", 3), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_keyboard_navigates_then_quits() {
        // Arrange
        let (presentation, _task) = Presentation::new(
            Arc::new(registry(&[("one", 1000), ("two", 1000), ("three", 1000)])),
            Arc::new(ScriptedNarrator::instant()),
            Arc::new(StageBoard::new()),
        )
        .with_config(SequencerConfig {
            autoplay: false,
            ..SequencerConfig::default()
        })
        .start();
        let shutdown = CancellationToken::new();
        let input: &[u8] = b"n\nn\nx\nq\nn\n";

        // Act
        run_keyboard(input, presentation.clone(), shutdown.clone()).await;

        // Assert
        assert!(shutdown.is_cancelled());
        let snapshot = presentation.snapshot().await.unwrap();
        assert_eq!(snapshot.current_index, SceneIndex(2));
    }
}
