use crate::assistant::ChatAssistant;
use crate::handlers::{chat_handler, health_check};
use axum::{Router, routing::get, routing::post};

/// Creates and configures all application routes
pub fn create_routes() -> Router<ChatAssistant> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat_handler))
}
