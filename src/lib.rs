pub mod app;
pub mod assistant;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

// Re-export key functions for convenience
pub use app::{create_app, init_tracing};
