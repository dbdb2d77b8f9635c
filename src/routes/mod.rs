// src/routes/mod.rs
pub mod chat;

use crate::message::HealthResponse;
use crate::state::SharedState;
use axum::{
    Json, Router,
    http::HeaderValue,
    routing::{get, post},
};
use chat::{chat_handler, stt_handler};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub const HEALTH_MESSAGE: &str = "AI Agent Backend is operational.";

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(health_handler))
        .route("/chat", post(chat_handler))
        .route("/stt", post(stt_handler))
        .layer(TraceLayer::new_for_http())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: HEALTH_MESSAGE.to_string(),
    })
}

/// Credentialed CORS for the listed frontends. Methods and headers are
/// mirrored because wildcards are not allowed alongside credentials.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(_) if origin == "*" => {
                tracing::warn!("ignoring wildcard CORS origin, credentials require explicit origins");
                None
            }
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
