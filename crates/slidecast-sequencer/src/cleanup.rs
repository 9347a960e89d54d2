//! Teardown of a scene's outstanding work and visual side effects.

use std::sync::Arc;

use slidecast_content::SceneRegistry;
use slidecast_core::scene::SceneIndex;
use slidecast_demo::{Stage, VisualChange, reset_stage};
use slidecast_narration::Narrator;
use tracing::debug;

use crate::state::SequencerState;

/// Tears a scene down before anything else is scheduled.
///
/// Cleanup is synchronous and idempotent: running it twice leaves the state
/// and the stage exactly as running it once.
pub struct CleanupCoordinator {
    registry: Arc<SceneRegistry>,
    narrator: Arc<dyn Narrator>,
    stage: Arc<dyn Stage>,
}

impl CleanupCoordinator {
    /// Creates a coordinator over the presentation's collaborators.
    #[must_use]
    pub fn new(
        registry: Arc<SceneRegistry>,
        narrator: Arc<dyn Narrator>,
        stage: Arc<dyn Stage>,
    ) -> Self {
        Self {
            registry,
            narrator,
            stage,
        }
    }

    /// Cancels every outstanding token, stops narration (paused or not),
    /// resets the visuals of `scene`'s demo and dismisses notifications.
    ///
    /// Returns the number of tokens cancelled.
    pub fn cleanup(&self, state: &mut SequencerState, scene: SceneIndex) -> usize {
        let tokens = state.take_tokens();
        let cancelled = tokens.len();
        for token in tokens {
            token.cancel();
        }
        self.narrator.cancel();
        state.narration_paused = false;

        if let Some(script) = self
            .registry
            .get(scene)
            .ok()
            .and_then(|definition| definition.demo.as_ref())
        {
            reset_stage(script, self.stage.as_ref());
        }
        self.stage.apply(VisualChange::DismissNotifications);

        debug!(%scene, cancelled, "scene cleaned up");
        cancelled
    }
}

impl std::fmt::Debug for CleanupCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleanupCoordinator")
            .field("scenes", &self.registry.count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use slidecast_content::SceneDefinition;
    use slidecast_core::cancel::{CancelToken, WorkKind};
    use slidecast_demo::routines::Reveal;
    use slidecast_demo::{DemoScript, NotificationLevel, StageBoard};
    use slidecast_test_support::{ScriptedNarrator, scene};

    use super::*;

    fn registry() -> Arc<SceneRegistry> {
        let revealing = SceneDefinition {
            demo: Some(DemoScript::Reveal(Reveal {
                group: "steps".into(),
                lead_in_ms: 0,
                count: 3,
                stagger_ms: 100,
                settle_ms: 0,
            })),
            ..scene(1, "steps to start", 1000)
        };
        Arc::new(SceneRegistry::new(vec![scene(0, "welcome", 1000), revealing]).unwrap())
    }

    fn live_state() -> (SequencerState, Vec<tokio_util::sync::CancellationToken>) {
        let mut state = SequencerState::new(true);
        state.current_index = SceneIndex(1);
        let generation = state.begin_generation();
        let mut signals = Vec::new();
        for kind in [WorkKind::Narration, WorkKind::Demo, WorkKind::AdvanceTimer] {
            let token = CancelToken::issue(generation, kind);
            signals.push(token.signal());
            state.register(token);
        }
        (state, signals)
    }

    #[test]
    fn test_cleanup_cancels_every_token() {
        let narrator = Arc::new(ScriptedNarrator::instant());
        let coordinator =
            CleanupCoordinator::new(registry(), narrator.clone(), Arc::new(StageBoard::new()));
        let (mut state, signals) = live_state();

        let cancelled = coordinator.cleanup(&mut state, SceneIndex(1));

        assert_eq!(cancelled, 3);
        assert!(signals.iter().all(tokio_util::sync::CancellationToken::is_cancelled));
        assert_eq!(state.snapshot().active_tokens, 0);
        assert!(!state.timer_armed());
        assert_eq!(narrator.cancel_count(), 1);
    }

    #[test]
    fn test_cleanup_resets_demo_visuals_and_notifications() {
        let board = Arc::new(StageBoard::new());
        let coordinator = CleanupCoordinator::new(
            registry(),
            Arc::new(ScriptedNarrator::instant()),
            board.clone(),
        );
        board.apply(VisualChange::Reveal {
            group: "steps".into(),
            index: 0,
        });
        board.apply(VisualChange::Notify {
            message: "Autoplay resumed".into(),
            level: NotificationLevel::Info,
        });
        let (mut state, _signals) = live_state();

        coordinator.cleanup(&mut state, SceneIndex(1));

        let snapshot = board.snapshot();
        assert!(snapshot.revealed.is_empty());
        assert!(snapshot.notifications.is_empty());
    }

    #[test]
    fn test_cleanup_twice_equals_cleanup_once() {
        let board = Arc::new(StageBoard::new());
        let coordinator = CleanupCoordinator::new(
            registry(),
            Arc::new(ScriptedNarrator::instant()),
            board.clone(),
        );
        board.apply(VisualChange::Reveal {
            group: "steps".into(),
            index: 2,
        });
        let (mut state, _signals) = live_state();

        coordinator.cleanup(&mut state, SceneIndex(1));
        let state_once = state.snapshot();
        let board_once = board.snapshot();
        let cancelled_again = coordinator.cleanup(&mut state, SceneIndex(1));

        assert_eq!(cancelled_again, 0);
        assert_eq!(state.snapshot(), state_once);
        assert_eq!(board.snapshot(), board_once);
    }

    #[test]
    fn test_cleanup_with_nothing_active_is_safe() {
        let coordinator = CleanupCoordinator::new(
            registry(),
            Arc::new(ScriptedNarrator::instant()),
            Arc::new(StageBoard::new()),
        );
        let mut state = SequencerState::new(false);

        let cancelled = coordinator.cleanup(&mut state, SceneIndex(0));

        assert_eq!(cancelled, 0);
    }
}
