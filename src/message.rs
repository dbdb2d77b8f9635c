// src/message.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_input: String,
    pub session_id: String,
}

/// Reply for every accepted chat request. `design_result_url` is always
/// present on the wire, `null` unless a design was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub message: String,
    pub design_result_url: Option<String>,
}

impl AgentResponse {
    pub fn text(message: impl Into<String>) -> Self {
        Self { message: message.into(), design_result_url: None }
    }

    pub fn design(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self { message: message.into(), design_result_url: Some(url.into()) }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub text: String,
}
