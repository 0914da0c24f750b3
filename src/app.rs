use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::assistant::ChatAssistant;
use crate::config::Config;
use crate::routes::create_routes;

/// Initialize tracing and logging for the application
pub fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create and configure the Axum application with all routes and middleware
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    info!("Initializing application router");

    let missing = config.missing_keys();
    if !missing.is_empty() {
        warn!(
            "Missing API keys: {}; upstream calls will fail authentication",
            missing.join(", ")
        );
    }

    let assistant = ChatAssistant::from_config(config)?;
    Ok(app_with_assistant(assistant))
}

/// Router over an already wired assistant
pub fn app_with_assistant(assistant: ChatAssistant) -> Router {
    create_routes()
        .with_state(assistant)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
