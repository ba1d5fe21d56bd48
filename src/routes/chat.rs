use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{debug, error};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, StatusResponse},
    state::SharedState,
};

pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const STATUS_MESSAGE: &str = "Chatbot server is running";

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload.inspect_err(|e| debug!("Rejected chat body: {}", e.body_text()))?;

    let Some(message) = payload.text() else {
        debug!("Chat request without a message");
        return Err(AppError::BadRequest(MESSAGE_REQUIRED.to_string()));
    };

    let response = state
        .upstream
        .complete(&message)
        .await
        .inspect_err(|e| error!("Relay failed: {}", e))?;

    Ok(Json(ChatResponse { response }))
}

pub async fn status_handler(State(state): State<SharedState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online".to_string(),
        message: STATUS_MESSAGE.to_string(),
        model: state.config.model.clone(),
    })
}
