use serde::{Deserialize, Serialize};

use crate::error::FALLBACK_REPLY;

/// Request payload for the chat endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response payload for the chat endpoint.
/// `redirect` is only present when a media item was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// Response payload for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Service is healthy".to_string(),
        }
    }
}

impl ChatResponse {
    pub fn reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            redirect: None,
        }
    }

    pub fn with_redirect(reply: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            redirect: Some(redirect.into()),
        }
    }

    pub fn fallback() -> Self {
        Self::reply(FALLBACK_REPLY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_omitted_when_absent() {
        let json = serde_json::to_string(&ChatResponse::reply("hello")).unwrap();
        assert_eq!(json, r#"{"reply":"hello"}"#);
    }

    #[test]
    fn test_redirect_serialized_when_present() {
        let response = ChatResponse::with_redirect(
            "I found 'Inception'!",
            "https://www.themoviedb.org/movie/27205",
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["reply"], "I found 'Inception'!");
        assert_eq!(json["redirect"], "https://www.themoviedb.org/movie/27205");
    }
}
