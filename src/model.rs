//! Data models for the URL shortener application
//!
//! This module defines the persisted mapping record and the
//! request/response shapes used by the HTTP API.

use serde::{Deserialize, Serialize};

/// A persisted URL mapping.
///
/// A mapping is created exactly once, on the first successful shorten
/// request for a given original URL, and is never mutated or deleted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    /// The original long URL, stored exactly as submitted (no
    /// normalization of trailing slashes, case, or query order).
    pub original_url: String,

    /// Sequential positive identifier, assigned in creation order
    /// starting at 1. This is the number used in the public short link.
    pub short_id: u64,
}

/// Request payload for shortening a URL.
///
/// Submitted as an urlencoded form body (`url=https://example.com/...`)
/// or as an equivalent JSON object.
#[derive(Deserialize)]
pub struct ShortenRequest {
    /// The original URL to be shortened
    pub url: String,
}

/// Response returned after a successful shorten request.
///
/// # Example
/// ```json
/// {
///   "original_url": "https://example.com/some/long/path",
///   "short_url": 1
/// }
/// ```
#[derive(Serialize)]
pub struct ShortenResponse {
    /// The original URL that was shortened
    pub original_url: String,

    /// The assigned integer identifier
    pub short_url: u64,
}

impl From<UrlMapping> for ShortenResponse {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            original_url: mapping.original_url,
            short_url: mapping.short_id,
        }
    }
}
