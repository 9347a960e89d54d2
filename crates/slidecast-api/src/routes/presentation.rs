//! Presentation control endpoints.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use slidecast_core::event::SequencerEvent;
use slidecast_core::scene::SceneIndex;
use slidecast_demo::StageSnapshot;
use slidecast_sequencer::SequencerSnapshot;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

/// Sequencer state plus what the audience sees as the heading.
#[derive(Debug, Serialize)]
pub struct PresentationResponse {
    /// Sequencer state.
    #[serde(flatten)]
    pub snapshot: SequencerSnapshot,
    /// Number of scenes.
    pub scene_count: usize,
    /// Title of the current scene.
    pub title: String,
}

/// One row of the scene listing.
#[derive(Debug, Serialize)]
pub struct SceneSummary {
    /// Position in the presentation.
    pub index: SceneIndex,
    /// Scene heading.
    pub title: String,
    /// Spoken text.
    pub narration: String,
    /// Name of the demo routine, if any.
    pub demo: Option<&'static str>,
    /// Shortest time on screen.
    pub minimum_duration_ms: u64,
}

/// The visible stage and the caption being spoken.
#[derive(Debug, Serialize)]
pub struct StageResponse {
    /// Materialized visual state.
    pub stage: StageSnapshot,
    /// Text currently being narrated, if captions are available.
    pub caption: Option<String>,
    /// Whether the caption is held by a paused narrator.
    pub caption_paused: bool,
}

fn respond(state: &AppState, snapshot: SequencerSnapshot) -> Json<PresentationResponse> {
    let title = state
        .registry
        .get(snapshot.current_index)
        .map(|scene| scene.title.clone())
        .unwrap_or_default();
    Json(PresentationResponse {
        snapshot,
        scene_count: state.registry.count(),
        title,
    })
}

#[instrument(skip(state))]
async fn current(State(state): State<AppState>) -> Result<Json<PresentationResponse>, ApiError> {
    let snapshot = state.presentation.snapshot().await?;
    Ok(respond(&state, snapshot))
}

#[instrument(skip(state))]
async fn scenes(State(state): State<AppState>) -> Json<Vec<SceneSummary>> {
    let scenes = state
        .registry
        .iter()
        .map(|scene| SceneSummary {
            index: scene.index,
            title: scene.title.clone(),
            narration: scene.narration.clone(),
            demo: scene.demo.as_ref().map(|script| script.demo().name()),
            minimum_duration_ms: u64::try_from(scene.minimum_duration.as_millis())
                .unwrap_or(u64::MAX),
        })
        .collect();
    Json(scenes)
}

#[instrument(skip(state))]
async fn stage(State(state): State<AppState>) -> Json<StageResponse> {
    Json(StageResponse {
        stage: state.board.snapshot(),
        caption: state.captions.as_ref().and_then(|narrator| narrator.caption()),
        caption_paused: state
            .captions
            .as_ref()
            .is_some_and(|narrator| narrator.is_paused()),
    })
}

#[instrument(skip(state))]
async fn events(State(state): State<AppState>) -> Json<Vec<SequencerEvent>> {
    Json(state.journal.entries())
}

#[instrument(skip(state))]
async fn next(State(state): State<AppState>) -> Result<Json<PresentationResponse>, ApiError> {
    let snapshot = state.presentation.next().await?;
    info!(scene = %snapshot.current_index, "moved to next scene");
    Ok(respond(&state, snapshot))
}

#[instrument(skip(state))]
async fn previous(State(state): State<AppState>) -> Result<Json<PresentationResponse>, ApiError> {
    let snapshot = state.presentation.previous().await?;
    info!(scene = %snapshot.current_index, "moved to previous scene");
    Ok(respond(&state, snapshot))
}

#[instrument(skip(state))]
async fn goto(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<PresentationResponse>, ApiError> {
    let snapshot = state.presentation.goto(SceneIndex(index)).await?;
    info!(scene = %snapshot.current_index, "jumped to scene");
    Ok(respond(&state, snapshot))
}

#[instrument(skip(state))]
async fn toggle_autoplay(
    State(state): State<AppState>,
) -> Result<Json<PresentationResponse>, ApiError> {
    let snapshot = state.presentation.toggle_autoplay().await?;
    info!(playing = snapshot.playing, "autoplay toggled");
    Ok(respond(&state, snapshot))
}

/// Returns the presentation router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(current))
        .route("/scenes", get(scenes))
        .route("/stage", get(stage))
        .route("/events", get(events))
        .route("/next", post(next))
        .route("/previous", post(previous))
        .route("/goto/{index}", post(goto))
        .route("/toggle-autoplay", post(toggle_autoplay))
}
