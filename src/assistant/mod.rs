pub mod classifier;
pub mod interpreter;
pub mod resolver;

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::ChatResponse;
use classifier::{IntentClassifier, OpenRouterClassifier};
use interpreter::{Intent, interpret};
use resolver::{MediaMatch, MediaSearch, TmdbClient};

/// Answers one chat message: classify, interpret, and resolve a title when
/// one was named. Holds no per-request state, so one instance serves all
/// requests.
#[derive(Clone)]
pub struct ChatAssistant {
    classifier: Arc<dyn IntentClassifier>,
    search: Arc<dyn MediaSearch>,
}

impl ChatAssistant {
    pub fn new(classifier: Arc<dyn IntentClassifier>, search: Arc<dyn MediaSearch>) -> Self {
        Self { classifier, search }
    }

    /// Wires the OpenRouter and TMDB clients over one shared HTTP client.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::new(
            Arc::new(OpenRouterClassifier::from_config(client.clone(), config)),
            Arc::new(TmdbClient::from_config(client, config)),
        ))
    }

    pub async fn respond(&self, message: &str) -> AppResult<ChatResponse> {
        let raw = self.classifier.classify(message).await?;

        match interpret(&raw) {
            Intent::Chat { reply } => {
                info!("Classified as chat");
                Ok(ChatResponse::reply(reply))
            }
            Intent::FindMovie { title } => {
                info!("Classified as find_movie: '{}'", title);
                self.resolve(&title).await
            }
        }
    }

    async fn resolve(&self, title: &str) -> AppResult<ChatResponse> {
        let results = self.search.search(title).await?;

        match MediaMatch::from_results(&results, title, self.search.site_url()) {
            Some(found) => {
                info!(
                    "Resolved '{}' to {} {} ({})",
                    title, found.media_type, found.id, found.url
                );
                Ok(ChatResponse::with_redirect(
                    format!("I found '{}'!", found.title),
                    found.url,
                ))
            }
            None => {
                info!("No search results for '{}'", title);
                Ok(ChatResponse::reply(format!(
                    "Sorry, I couldn't find '{}'.",
                    title
                )))
            }
        }
    }
}
