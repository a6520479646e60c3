//! Hostname resolvability checks
//!
//! Shorten requests are only accepted for URLs whose hostname actually
//! resolves. The check is behind a trait so tests can substitute a fake
//! resolver instead of performing real network lookups.

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::lookup_host;
use tokio::time::timeout;

/// How long a single DNS lookup may take before the hostname is treated
/// as unresolvable. The upstream behavior specifies no timeout; 3 seconds
/// is this implementation's chosen bound.
const RESOLVE_TIMEOUT: Duration = Duration::from_secs(3);

/// Capability to decide whether a hostname resolves.
#[async_trait]
pub trait HostResolver: Send + Sync + 'static {
    /// Returns `true` if `host` resolves to at least one address.
    async fn resolve(&self, host: &str) -> bool;
}

/// Real resolver backed by the system's DNS via `tokio::net::lookup_host`.
pub struct DnsResolver;

#[async_trait]
impl HostResolver for DnsResolver {
    async fn resolve(&self, host: &str) -> bool {
        // The port is irrelevant; lookup_host just needs a socket-address
        // form to hand to the system resolver.
        match timeout(RESOLVE_TIMEOUT, lookup_host((host, 80))).await {
            Ok(Ok(mut addrs)) => addrs.next().is_some(),
            // Lookup error or timeout: treat the host as unresolvable.
            _ => false,
        }
    }
}
