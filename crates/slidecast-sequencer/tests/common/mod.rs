#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::DateTime;
use slidecast_content::SceneRegistry;
use slidecast_demo::StageBoard;
use slidecast_sequencer::{Presentation, PresentationHandle, SequencerConfig};
use slidecast_test_support::{FixedClock, RecordingSink, ScriptedNarrator};
use tokio::task::JoinHandle;

pub struct Harness {
    pub handle: PresentationHandle,
    pub task: JoinHandle<()>,
    pub narrator: Arc<ScriptedNarrator>,
    pub board: Arc<StageBoard>,
    pub sink: Arc<RecordingSink>,
}

/// Instant transitions and 50 ms per narrated word.
pub fn quick_config() -> SequencerConfig {
    SequencerConfig {
        autoplay: true,
        word_duration: Duration::from_millis(50),
        transition_delay: Duration::ZERO,
        settle_timeout: Duration::from_secs(10),
    }
}

pub fn paused_config() -> SequencerConfig {
    SequencerConfig {
        autoplay: false,
        ..quick_config()
    }
}

pub fn start(
    registry: SceneRegistry,
    narrator: ScriptedNarrator,
    config: SequencerConfig,
) -> Harness {
    let narrator = Arc::new(narrator);
    let board = Arc::new(StageBoard::new());
    let sink = Arc::new(RecordingSink::default());
    let (handle, task) = Presentation::new(Arc::new(registry), narrator.clone(), board.clone())
        .with_sink(sink.clone())
        .with_clock(Arc::new(FixedClock(DateTime::UNIX_EPOCH)))
        .with_config(config)
        .start();
    Harness {
        handle,
        task,
        narrator,
        board,
        sink,
    }
}

/// `count` words of narration.
pub fn words(count: usize) -> String {
    vec!["word"; count].join(" ")
}

pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
