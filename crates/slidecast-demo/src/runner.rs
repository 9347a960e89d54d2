//! Entry points used by the sequencer to play and reset demos.

use tracing::{debug, info};

use crate::context::{Cancelled, DemoContext};
use crate::script::DemoScript;
use crate::stage::Stage;

/// Plays `script` in `cx`. Cancellation is a normal outcome and is absorbed.
pub async fn run_demo(script: &DemoScript, cx: &DemoContext) {
    let demo = script.demo();
    debug!(scene = %cx.scene(), demo = demo.name(), "demo started");
    match demo.run(cx).await {
        Ok(()) => debug!(scene = %cx.scene(), demo = demo.name(), "demo finished"),
        Err(Cancelled) => info!(scene = %cx.scene(), demo = demo.name(), "demo cancelled"),
    }
}

/// Applies the reset changes of `script` to `stage`.
pub fn reset_stage(script: &DemoScript, stage: &dyn Stage) {
    for change in script.demo().reset() {
        stage.apply(change);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::board::StageBoard;
    use crate::routines::Reveal;
    use crate::routines::testing::context;
    use crate::stage::VisualChange;

    fn reveal() -> DemoScript {
        DemoScript::Reveal(Reveal {
            group: "security".into(),
            lead_in_ms: 0,
            count: 3,
            stagger_ms: 0,
            settle_ms: 0,
        })
    }

    #[tokio::test]
    async fn test_run_demo_absorbs_cancellation() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let (recorder, cx) = context(cancel);

        run_demo(&reveal(), &cx).await;

        assert!(recorder.changes().is_empty());
    }

    #[tokio::test]
    async fn test_reset_undoes_a_finished_demo() {
        let (recorder, cx) = context(CancellationToken::new());
        let board = Arc::new(StageBoard::new());
        run_demo(&reveal(), &cx).await;
        for change in recorder.changes() {
            board.apply(change);
        }
        assert_eq!(board.snapshot().revealed["security"].len(), 3);

        reset_stage(&reveal(), board.as_ref());

        assert!(board.snapshot().revealed.is_empty());
        assert!(matches!(
            recorder.changes().last(),
            Some(VisualChange::Reveal { index: 2, .. })
        ));
    }
}
