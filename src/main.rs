mod api;
mod classifier;
mod config;
mod storage;

use crate::api::{AppState, health_handler};
use crate::classifier::BertClassifier;
use crate::config::AppConfig;
use crate::storage::CommentStore;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("🚀 Starting Review Sentiment API Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Model: {}", config.model.path);
    info!("   - Database: {}", config.database.path);
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // Load classification model
    info!("🧠 Loading sentiment model...");
    let model = Arc::new(BertClassifier::load(
        &config.model.path,
        config.model.max_length,
    )?);
    info!("✅ Sentiment model ready");

    // Initialize comment storage
    info!("💾 Initializing comment storage...");
    let store = Arc::new(CommentStore::new(&config.database.path));
    store.initialize()?;
    let comment_count = store.count_comments()?;
    info!("✅ Comment storage ready ({} comments)", comment_count);

    // Create application state
    let state = AppState { model, store };

    // Build router with modular routes
    let app = Router::new()
        .route("/health", get(health_handler))
        .merge(api::classify::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /health      - Health check");
    info!("   POST /clasificar  - Classify and store a comment");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
