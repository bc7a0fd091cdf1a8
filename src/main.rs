//! portico-gateway server entry point.
//!
//! Builds the dispatcher from the built-in applications, then starts the
//! Axum HTTP server with the gateway installed as the fallback handler.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use portico_gateway::app_state::AppState;
use portico_gateway::apps;
use portico_gateway::config::GatewayConfig;
use portico_gateway::gateway::{Dispatcher, dispatch_handler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting portico-gateway");

    // Register applications. The dispatcher must be complete before the
    // listener accepts its first connection.
    let mut dispatcher = Dispatcher::new(config.favicon_path.clone());
    for app in apps::builtin_apps(&config) {
        tracing::info!(app = app.name(), "registering application");
        dispatcher.register(app);
    }
    tracing::info!(apps = dispatcher.len(), "application registry ready");

    let app_state = AppState {
        dispatcher: Arc::new(dispatcher),
    };

    // Build router: everything falls through to the gateway dispatcher.
    let app = Router::new()
        .fallback(dispatch_handler)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(config.body_max_bytes))
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
