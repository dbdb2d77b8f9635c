// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Errors that reach the HTTP boundary. Collaborator failures never end up
/// here; the dispatcher turns them into apology text.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        tracing::debug!(%status, error = %self, "rejecting request");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
