use movie_chat_svc::app::{create_app, init_tracing};
use movie_chat_svc::config::Config;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the environment may already be set
    let dotenv = dotenvy::dotenv();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing/logging
    init_tracing(&config);

    info!("Starting movie chat service...");
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }
    info!("Configuration loaded: {:?}", config);

    // Create the application
    let app = match create_app(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to create app: {}", e);
            std::process::exit(1);
        }
    };

    // Create TCP listener
    let listener = match tokio::net::TcpListener::bind(&config.bind_address()).await {
        Ok(listener) => {
            info!("Server running on {}", config.server_url());
            info!("Health check: GET /health");
            info!("Chat endpoint: POST /api/chat");
            listener
        }
        Err(e) => {
            error!("Failed to bind to {}: {}", config.bind_address(), e);
            std::process::exit(1);
        }
    };

    // Start the server
    info!("Server starting...");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    } else {
        info!("Server shutdown gracefully");
    }
}
