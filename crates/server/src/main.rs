//! Contact Book API server.
//!
//! This binary serves the contacts REST API (default port 3001).
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - `PostgreSQL` via a sqlx connection pool owned by `AppState`
//! - The `contacts` table is created at startup if absent
//! - Sentry error tracking when `SENTRY_DSN` is set

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::ServiceExt;
use axum::extract::Request;

use contact_book_server::config::ServerConfig;
use contact_book_server::state::AppState;
use contact_book_server::{db, routes, telemetry};

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = telemetry::init_sentry(&config);
    telemetry::init_tracing();

    // Initialize database connection pool
    let pool = db::create_pool(&config.database_url, config.max_connections)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    db::ensure_schema(&pool)
        .await
        .expect("Failed to create contacts table");

    let state = AppState::new(config, pool.clone());
    let addr = state.config().socket_addr();

    // Sentry layers (outermost for full request coverage)
    let app = routes::app(state)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    // Start server
    tracing::info!("contacts API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let app = ServiceExt::<Request>::into_make_service(routes::normalized(app));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    pool.close().await;
    tracing::info!("Database pool closed");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
