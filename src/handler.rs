//! HTTP request handlers for the URL shortener API
//!
//! Handlers translate service results into the wire contract: every
//! validation-class failure is an HTTP 200 with a JSON `{"error": ...}`
//! body, never a 4xx/5xx. That contract is load-bearing for existing
//! clients, so the handlers log the precise failure and then emit the
//! mandated message.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::{IntoResponse, Redirect},
    Json,
};
use serde_json::json;
use url::form_urlencoded;

use crate::model::{ShortenRequest, ShortenResponse};
use crate::service::{AppState, ResolveError};

/// Pulls the `url` field out of a shorten request body.
///
/// Accepts both urlencoded forms and JSON objects. Returns `None` when the
/// body cannot be parsed or carries no `url` field; the caller reports
/// that exactly like any other invalid URL.
fn extract_url_field(headers: &HeaderMap, body: &Bytes) -> Option<String> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if content_type.starts_with("application/json") {
        serde_json::from_slice::<ShortenRequest>(body)
            .ok()
            .map(|payload| payload.url)
    } else {
        form_urlencoded::parse(body)
            .find(|(key, _)| key.as_ref() == "url")
            .map(|(_, value)| value.into_owned())
    }
}

/// Shortens a URL.
///
/// Accepts a body with a `url` field, either as an urlencoded form or as
/// JSON. On success returns the mapping; re-submitting an
/// already-shortened URL returns the existing identifier without creating
/// a new record.
///
/// The body is read raw rather than through the `Form` extractor so that
/// a missing or undeserializable `url` field still produces the standard
/// 200 error body instead of an extractor-generated 422.
///
/// # Response
///
/// - `{"original_url": .., "short_url": <id>}` on success
/// - `{"error": "invalid url"}` for a missing `url` field, malformed
///   input, a scheme other than http/https, an unresolvable hostname, or
///   any internal failure
pub async fn shorten_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let Some(url) = extract_url_field(&headers, &body) else {
        tracing::warn!("shorten request body carried no url field");
        return Json(json!({ "error": "invalid url" })).into_response();
    };

    match state.service.shorten(&url).await {
        Ok(mapping) => {
            tracing::debug!(short_id = mapping.short_id, "url shortened");
            Json(ShortenResponse::from(mapping)).into_response()
        }
        Err(err) => {
            tracing::warn!(url = %url, error = %err, "shorten request rejected");
            Json(json!({ "error": "invalid url" })).into_response()
        }
    }
}

/// Redirects a short identifier to its original URL.
///
/// # Path Parameters
///
/// - `short_url` - The integer identifier. Non-numeric values are treated
///   the same as an unknown identifier.
///
/// # Response
///
/// - **307 Temporary Redirect** to the original URL
/// - `{"error": "short url not found"}` for an unknown identifier
/// - `{"error": "invalid short url"}` for an internal failure
pub async fn redirect_url(
    Path(short_url): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.service.resolve(&short_url).await {
        Ok(mapping) => Redirect::temporary(&mapping.original_url).into_response(),
        Err(ResolveError::NotFound) => {
            Json(json!({ "error": "short url not found" })).into_response()
        }
        Err(err) => {
            tracing::error!(id = %short_url, error = %err, "resolve failed");
            Json(json!({ "error": "invalid short url" })).into_response()
        }
    }
}

/// Smoke-test endpoint.
pub async fn hello() -> impl IntoResponse {
    Json(json!({ "greeting": "hello API" }))
}
