use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::models::ChatResponse;

/// The only reply a caller ever sees when something upstream fails
pub const FALLBACK_REPLY: &str = "Something went wrong.";

/// Failures of the outbound calls made while handling a chat message
#[derive(Debug)]
pub enum AppError {
    /// The request never produced a response (connect, TLS, body read).
    Transport(String),
    UpstreamStatus {
        service: &'static str,
        status: u16,
        body: String,
    },
    MalformedResponse {
        service: &'static str,
        message: String,
    },
}

impl AppError {
    pub fn malformed(service: &'static str, message: impl Into<String>) -> Self {
        AppError::MalformedResponse {
            service,
            message: message.into(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Transport(msg) => write!(f, "transport error: {}", msg),
            AppError::UpstreamStatus {
                service,
                status,
                body,
            } => write!(f, "{} returned status {}: {}", service, status, body),
            AppError::MalformedResponse { service, message } => {
                write!(f, "malformed response from {}: {}", service, message)
            }
        }
    }
}

impl std::error::Error for AppError {}

// The URL is dropped because request URLs can carry API keys.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.without_url().to_string())
    }
}

/// Error boundary for the chat endpoint: the cause is logged, the caller
/// gets a 200 with the fixed fallback reply and nothing else.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Chat request failed: {}", self);
        (StatusCode::OK, Json(ChatResponse::fallback())).into_response()
    }
}

/// Result type for application handlers
pub type AppResult<T> = Result<T, AppError>;
