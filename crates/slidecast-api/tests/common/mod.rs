#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use slidecast_api::state::AppState;
use slidecast_demo::StageBoard;
use slidecast_sequencer::{EventJournal, Presentation, PresentationHandle, SequencerConfig};
use slidecast_test_support::{ScriptedNarrator, registry};
use tower::ServiceExt;

/// A router over a paused three-scene presentation.
pub struct TestApp {
    pub router: Router,
    pub presentation: PresentationHandle,
}

pub fn build_test_app() -> TestApp {
    let registry = Arc::new(registry(&[
        ("welcome to the tour", 1000),
        ("here is the dashboard", 1000),
        ("thanks for watching", 1000),
    ]));
    let board = Arc::new(StageBoard::new());
    let journal = Arc::new(EventJournal::default());
    let (presentation, _task) = Presentation::new(
        Arc::clone(&registry),
        Arc::new(ScriptedNarrator::instant()),
        board.clone(),
    )
    .with_sink(journal.clone())
    .with_config(SequencerConfig {
        autoplay: false,
        ..SequencerConfig::default()
    })
    .start();

    let state = AppState::new(presentation.clone(), registry, board, journal);
    TestApp {
        router: slidecast_api::router(state),
        presentation,
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

pub async fn post(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}
