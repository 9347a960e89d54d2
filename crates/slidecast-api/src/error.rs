//! Slidecast — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use slidecast_content::ContentError;
use slidecast_core::error::SequencerError;
use thiserror::Error;

/// Startup and runtime errors for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The scene table could not be loaded.
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `SequencerError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub SequencerError);

impl From<SequencerError> for ApiError {
    fn from(err: SequencerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            SequencerError::OutOfRange { .. } => (StatusCode::BAD_REQUEST, "scene_out_of_range"),
            SequencerError::Stopped => (StatusCode::SERVICE_UNAVAILABLE, "sequencer_stopped"),
            SequencerError::StaleGeneration { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
