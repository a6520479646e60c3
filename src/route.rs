//! Route definitions for the URL shortener API
//!
//! This module configures all HTTP routes and maps them to their respective
//! handlers.

use axum::routing::{get, post};
use axum::Router;

use crate::handler::{hello, redirect_url, shorten_url};
use crate::service::AppState;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `POST /api/shorturl` - Shortens a URL submitted as form field `url`
/// - `GET /api/shorturl/{short_url}` - Redirects to the original URL
/// - `GET /api/hello` - Smoke-test endpoint
///
/// # Arguments
///
/// * `state` - Application state containing the shortener service
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/shorturl", post(shorten_url))
        .route("/api/shorturl/{short_url}", get(redirect_url))
        .route("/api/hello", get(hello))
        .with_state(state)
}
