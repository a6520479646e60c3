//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Opens the database (fatal on failure)
//! - Starts the HTTP server with graceful shutdown support

use std::env;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

// Module declarations
mod database;
mod handler;
mod model;
mod resolver;
mod route;
mod service;

use database::UrlStore;
use resolver::DnsResolver;
use route::create_app;
use service::{AppState, ShortenerService};

/// Application entry point
///
/// 1. Loads environment variables from a .env file if present
/// 2. Reads configuration (PORT and DATABASE_URL)
/// 3. Opens the embedded database — any failure here aborts startup
///    before the listener binds
/// 4. Wires the DNS resolver and shortener service into the router
/// 5. Serves HTTP with graceful shutdown handling
///
/// # Environment Variables
///
/// - `PORT` - Server port number (default: 8080)
/// - `DATABASE_URL` - Path to the database file (default: "data.db")
#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("shorturl=debug,tower_http=debug")
        .init();

    let port_str = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let port: u16 = port_str.parse().unwrap_or(8080);

    let db_name = env::var("DATABASE_URL").unwrap_or_else(|_| "data.db".to_string());

    // A storage failure at startup is fatal: refuse to serve traffic.
    let store = UrlStore::open(&db_name).expect("Failed to initialize database");

    let service = ShortenerService::new(store, Arc::new(DnsResolver));
    let state = AppState {
        service: Arc::new(service),
    };

    let app = create_app(state).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Server running at http://localhost:{}", port);
    tracing::info!("Using database: {}", db_name);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

/// Handles graceful shutdown signals
///
/// Returns when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received, letting
/// in-flight requests complete and the database close cleanly.
async fn shutdown_signal() {
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

    tracing::info!("Shutdown signal received, stopping server.");
}
