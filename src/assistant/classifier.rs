use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};

const SERVICE: &str = "openrouter";

pub const CLASSIFY_PROMPT: &str = r#"You are a movie assistant.
If the user mentions a movie or TV show title, extract it and respond only in JSON:
{ "intent": "find_movie", "title": "Movie name" }
Otherwise, reply normally:
{ "intent": "chat", "reply": "normal chatbot response" }"#;

/// Asks a language model whether a message names a movie or show.
/// Returns the model's raw text; interpreting it is not this trait's job.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, message: &str) -> AppResult<String>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// [`IntentClassifier`] backed by the OpenRouter chat-completions API
#[derive(Debug, Clone)]
pub struct OpenRouterClassifier {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenRouterClassifier {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(
            client,
            &config.openrouter_base_url,
            &config.openrouter_api_key,
            &config.openrouter_model,
        )
    }
}

#[async_trait]
impl IntentClassifier for OpenRouterClassifier {
    async fn classify(&self, message: &str) -> AppResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let payload = CompletionRequest {
            model: &self.model,
            messages: vec![
                CompletionMessage {
                    role: "system",
                    content: CLASSIFY_PROMPT,
                },
                CompletionMessage {
                    role: "user",
                    content: message,
                },
            ],
        };

        info!("Classifying message with model {}", self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        debug!("Completion API responded with status: {}", status);

        if !status.is_success() {
            let body = response.text().await?;
            return Err(AppError::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        debug!("Completion response body: {}", body);

        let completion: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::malformed(SERVICE, e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::malformed(SERVICE, "response contained no choices"))?
            .message
            .content
            .ok_or_else(|| AppError::malformed(SERVICE, "first choice has no content"))
    }
}
