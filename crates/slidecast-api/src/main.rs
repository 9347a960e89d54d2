//! Slidecast presentation server.

use std::sync::Arc;

use slidecast_api::config::AppConfig;
use slidecast_api::keyboard::run_keyboard;
use slidecast_api::narrator::build_narrator;
use slidecast_api::state::AppState;
use slidecast_content::SceneRegistry;
use slidecast_demo::{Stage, StageBoard, StageFanout, TracingStage};
use slidecast_sequencer::{EventJournal, Presentation};
use tokio::io::BufReader;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    tracing::info!("Starting Slidecast presentation server");

    let config = AppConfig::from_env()?;

    let registry = Arc::new(match &config.scenes {
        Some(path) => SceneRegistry::from_path(path)?,
        None => SceneRegistry::builtin()?,
    });
    tracing::info!(scenes = registry.count(), "Scene table loaded");

    let board = Arc::new(StageBoard::new());
    let stage: Arc<dyn Stage> = Arc::new(StageFanout::new(vec![
        Arc::clone(&board) as Arc<dyn Stage>,
        Arc::new(TracingStage),
    ]));
    let journal = Arc::new(EventJournal::default());
    let choice = build_narrator(&config).await;

    let (presentation, sequencer) = Presentation::new(Arc::clone(&registry), choice.narrator, stage)
        .with_sink(journal.clone())
        .with_config(config.sequencer)
        .start();

    let shutdown = CancellationToken::new();
    if config.keyboard {
        tokio::spawn(run_keyboard(
            BufReader::new(tokio::io::stdin()),
            presentation.clone(),
            shutdown.clone(),
        ));
    }
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received");
        }
        ctrl_c.cancel();
    });

    let app_state = AppState::new(presentation.clone(), registry, board, journal)
        .with_captions(choice.captions);
    let app = slidecast_api::router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.bind_addr()?;
    tracing::info!(%addr, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    if let Err(error) = presentation.shutdown().await {
        tracing::debug!(%error, "Presentation already stopped");
    }
    sequencer.await?;
    tracing::info!("Slidecast stopped");

    Ok(())
}
