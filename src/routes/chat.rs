use axum::{
    Json,
    extract::{Multipart, State},
};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{AgentResponse, ChatRequest, TranscriptionResponse},
    state::SharedState,
};

pub const TRANSCRIPTION_PLACEHOLDER: &str = "This is a placeholder for your transcribed voice input.";
const AUDIO_FIELD: &str = "audio_file";

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Json<AgentResponse> {
    let trimmed = payload.user_input.trim();

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id, session_id = %payload.session_id);
    let response = state
        .dispatcher
        .dispatch(trimmed, &payload.session_id)
        .instrument(span)
        .await;

    Json(response)
}

// Speech-to-text is not wired to a model yet; the upload is read and dropped.
pub async fn stt_handler(mut multipart: Multipart) -> Result<Json<TranscriptionResponse>, AppError> {
    let mut audio_bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() == Some(AUDIO_FIELD) {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            audio_bytes = Some(data.len());
        }
    }

    let Some(len) = audio_bytes else {
        return Err(AppError::BadRequest(format!("missing multipart field '{AUDIO_FIELD}'")));
    };
    tracing::info!(bytes = len, "received audio upload");

    Ok(Json(TranscriptionResponse { text: TRANSCRIPTION_PLACEHOLDER.to_string() }))
}
