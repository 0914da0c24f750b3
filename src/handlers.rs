use crate::assistant::ChatAssistant;
use crate::error::AppResult;
use crate::models::{ChatRequest, ChatResponse, HealthResponse};
use axum::{
    extract::{Json, State},
    response::Json as ResponseJson,
};
use tracing::{debug, info};

/// Health check handler
/// Returns the service status and health information
pub async fn health_check() -> AppResult<ResponseJson<HealthResponse>> {
    debug!("Health check endpoint called");

    let response = HealthResponse::ok();

    info!("Health check successful");
    Ok(ResponseJson(response))
}

/// Chat handler
/// Any upstream failure comes back through `AppError`'s response, which is
/// always a 200 carrying the generic fallback reply.
pub async fn chat_handler(
    State(assistant): State<ChatAssistant>,
    Json(payload): Json<ChatRequest>,
) -> AppResult<ResponseJson<ChatResponse>> {
    info!(
        "Chat endpoint called with a {} character message",
        payload.message.chars().count()
    );

    let response = assistant.respond(&payload.message).await?;

    info!(
        "Returning chat reply (redirect: {})",
        response.redirect.as_deref().unwrap_or("none")
    );
    Ok(ResponseJson(response))
}
