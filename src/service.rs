//! Shortener business logic
//!
//! This module implements the two operations of the service:
//!
//! - [`ShortenerService::shorten`] — validate a URL, deduplicate it, and
//!   assign it a sequential identifier.
//! - [`ShortenerService::resolve`] — look an identifier back up for the
//!   redirect.
//!
//! Each pipeline keeps a distinguishable error kind per failure site so
//! rejections can be logged precisely, even though the HTTP layer collapses
//! them into the single error shape the API contract mandates.

use std::sync::Arc;

use thiserror::Error;
use url::Url;

use crate::database::{StoreError, UrlStore};
use crate::model::UrlMapping;
use crate::resolver::HostResolver;

/// Why a shorten request was rejected.
///
/// Every variant is reported to the client as `{"error": "invalid url"}`.
#[derive(Debug, Error)]
pub enum ShortenError {
    #[error("malformed url: {0}")]
    Malformed(#[from] url::ParseError),

    #[error("scheme {0:?} is not allowed")]
    DisallowedScheme(String),

    #[error("url has no hostname")]
    MissingHost,

    #[error("hostname {0:?} did not resolve")]
    UnresolvableHost(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why a resolve request did not produce a redirect.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no mapping for the requested identifier")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The shortener service: validation, deduplication, identifier
/// assignment, and resolution.
///
/// Holds the storage adapter and an injected [`HostResolver`]; it keeps no
/// mapping state of its own.
pub struct ShortenerService {
    store: UrlStore,
    resolver: Arc<dyn HostResolver>,
}

impl ShortenerService {
    pub fn new(store: UrlStore, resolver: Arc<dyn HostResolver>) -> Self {
        Self { store, resolver }
    }

    /// Validates `raw_url` and returns its mapping, creating one on first
    /// sight.
    ///
    /// Validation order: URL syntax, scheme (`http`/`https` only), then a
    /// DNS check of the hostname. Deduplication keys on the raw input
    /// string exactly as received, not on a canonicalized form, so
    /// shortening the same string twice returns the same identifier and
    /// leaves the store unchanged.
    pub async fn shorten(&self, raw_url: &str) -> Result<UrlMapping, ShortenError> {
        let parsed = Url::parse(raw_url)?;

        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ShortenError::DisallowedScheme(scheme.to_string()));
        }

        let host = parsed.host_str().ok_or(ShortenError::MissingHost)?;
        if !self.resolver.resolve(host).await {
            return Err(ShortenError::UnresolvableHost(host.to_string()));
        }

        if let Some(existing) = self.store.find_by_original_url(raw_url)? {
            return Ok(existing);
        }

        // insert re-checks the dedup index under the write lock, so a
        // racing duplicate still converges on a single record.
        Ok(self.store.insert(raw_url)?)
    }

    /// Looks up the mapping for a short identifier.
    ///
    /// Non-numeric input cannot match any stored identifier and is
    /// reported as not-found rather than as a distinct error.
    pub async fn resolve(&self, raw_id: &str) -> Result<UrlMapping, ResolveError> {
        // Strict integer parse: trailing garbage is rejected, so "12abc"
        // is not-found rather than being read as id 12.
        let id = match raw_id.parse::<u64>() {
            Ok(id) => id,
            Err(_) => return Err(ResolveError::NotFound),
        };

        self.store
            .find_by_short_id(id)?
            .ok_or(ResolveError::NotFound)
    }
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ShortenerService>,
}
