use std::env;
use std::fmt;

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_OPENROUTER_MODEL: &str = "deepseek/deepseek-chat-v3.1:free";
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_SITE_URL: &str = "https://www.themoviedb.org";

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub openrouter_api_key: String,
    pub openrouter_base_url: String,
    pub openrouter_model: String,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_site_url: String,
}

impl Config {
    /// Reads the configuration once from the process environment.
    /// Missing API keys are left empty; only an unparsable `PORT` is an error.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        let port = port
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("PORT must be a valid number, got '{}': {}", port, e))?;

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            log_level: env::var("RUST_LOG")
                .unwrap_or_else(|_| "movie_chat_svc=info,tower_http=debug".to_string()),
            openrouter_api_key: env::var("OPENROUTER_API_KEY").unwrap_or_default(),
            openrouter_base_url: env_or("OPENROUTER_BASE_URL", DEFAULT_OPENROUTER_BASE_URL),
            openrouter_model: env_or("OPENROUTER_MODEL", DEFAULT_OPENROUTER_MODEL),
            tmdb_api_key: env::var("TMDB_API_KEY").unwrap_or_default(),
            tmdb_base_url: env_or("TMDB_BASE_URL", DEFAULT_TMDB_BASE_URL),
            tmdb_site_url: env_or("TMDB_SITE_URL", DEFAULT_TMDB_SITE_URL),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Names of the API key variables that are unset or empty.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.openrouter_api_key.is_empty() {
            missing.push("OPENROUTER_API_KEY");
        }
        if self.tmdb_api_key.is_empty() {
            missing.push("TMDB_API_KEY");
        }
        missing
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "movie_chat_svc=info,tower_http=debug".to_string(),
            openrouter_api_key: String::new(),
            openrouter_base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
            openrouter_model: DEFAULT_OPENROUTER_MODEL.to_string(),
            tmdb_api_key: String::new(),
            tmdb_base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            tmdb_site_url: DEFAULT_TMDB_SITE_URL.to_string(),
        }
    }
}

// Keys are masked so the config can be logged at startup.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("openrouter_api_key", &mask(&self.openrouter_api_key))
            .field("openrouter_base_url", &self.openrouter_base_url)
            .field("openrouter_model", &self.openrouter_model)
            .field("tmdb_api_key", &mask(&self.tmdb_api_key))
            .field("tmdb_base_url", &self.tmdb_base_url)
            .field("tmdb_site_url", &self.tmdb_site_url)
            .finish()
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "***" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_api_keys() {
        let config = Config {
            openrouter_api_key: "sk-or-secret".to_string(),
            tmdb_api_key: "tmdb-secret".to_string(),
            ..Config::default()
        };

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-or-secret"));
        assert!(!rendered.contains("tmdb-secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_missing_keys() {
        let config = Config::default();
        assert_eq!(
            config.missing_keys(),
            vec!["OPENROUTER_API_KEY", "TMDB_API_KEY"]
        );

        let config = Config {
            openrouter_api_key: "key".to_string(),
            ..Config::default()
        };
        assert_eq!(config.missing_keys(), vec!["TMDB_API_KEY"]);
    }

    #[test]
    fn test_bind_address() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..Config::default()
        };
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.server_url(), "http://127.0.0.1:3000");
    }
}
