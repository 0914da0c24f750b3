use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};

const SERVICE: &str = "tmdb";
const DEFAULT_MEDIA_TYPE: &str = "movie";

/// Searches a media catalogue by free text
#[async_trait]
pub trait MediaSearch: Send + Sync {
    /// Returns the upstream result list in the upstream's own order.
    /// A malformed first hit is an error; malformed later hits are dropped.
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResult>>;

    /// Root of the public site that item links point at.
    fn site_url(&self) -> &str;
}

// -- data structures that capture the search results

// Hits stay untyped until picked; only the first one has to be well formed.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Value>,
}

/// One hit of a multi-type search. Movies carry `title`, shows and people `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

/// The item a title resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMatch {
    pub title: String,
    pub id: i64,
    pub media_type: String,
    pub url: String,
}

impl MediaMatch {
    /// Builds a match from the first search hit, or `None` when there were no hits.
    pub fn from_results(results: &[SearchResult], query: &str, site_url: &str) -> Option<Self> {
        let first = results.first()?;

        let title = [first.title.as_deref(), first.name.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .unwrap_or(query)
            .to_string();
        let media_type = first
            .media_type
            .as_deref()
            .filter(|media_type| !media_type.is_empty())
            .unwrap_or(DEFAULT_MEDIA_TYPE)
            .to_string();
        let url = format!(
            "{}/{}/{}",
            site_url.trim_end_matches('/'),
            media_type,
            first.id
        );

        Some(Self {
            title,
            id: first.id,
            media_type,
            url,
        })
    }
}

/// [`MediaSearch`] backed by the TMDB `search/multi` endpoint
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    site_url: String,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            site_url: site_url.into(),
        }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(
            client,
            &config.tmdb_base_url,
            &config.tmdb_api_key,
            &config.tmdb_site_url,
        )
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search/multi?api_key={}&query={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl MediaSearch for TmdbClient {
    async fn search(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        let url = self.search_url(query);

        if self.api_key.is_empty() {
            info!("Executing TMDB search with URL: {}", url);
        } else {
            info!(
                "Executing TMDB search with URL: {}",
                url.replace(urlencoding::encode(&self.api_key).as_ref(), "***API_KEY***")
            );
        }

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        debug!("TMDB responded with status: {}", status);

        if !status.is_success() {
            let body = response.text().await?;
            return Err(AppError::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        info!("TMDB search results: {}", body);

        let search_response: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::malformed(SERVICE, e.to_string()))?;

        let mut hits = search_response.results.into_iter();
        let Some(first) = hits.next() else {
            return Ok(Vec::new());
        };
        let first: SearchResult = serde_json::from_value(first)
            .map_err(|e| AppError::malformed(SERVICE, format!("first result: {}", e)))?;

        let mut results = vec![first];
        results.extend(hits.filter_map(|hit| serde_json::from_value(hit).ok()));
        Ok(results)
    }

    fn site_url(&self) -> &str {
        &self.site_url
    }
}
