//! Slidecast control server.
//!
//! Serves the presentation state over HTTP and routes every navigation
//! request (HTTP or keyboard) through the sequencer's handle.

pub mod config;
pub mod error;
pub mod keyboard;
pub mod narrator;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the application router with every route mounted.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/presentation", routes::presentation::router())
        .with_state(state)
}
