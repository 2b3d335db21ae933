//! Upstream Fetcher Module
//!
//! Fetches status-code images from the remote image provider on cache miss.

use axum::body::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use crate::cache::CacheKey;
use crate::error::{ProxyError, Result};

/// Base URL of the image provider queried on cache misses.
pub const DEFAULT_UPSTREAM_URL: &str = "https://http.cat";

// == Upstream Client ==
/// HTTP client for the fixed upstream image service.
///
/// Performs exactly one GET per fetch; no retries, and no timeout beyond
/// the underlying client's defaults.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    // == Constructor ==
    /// Creates a client addressing images as `<base_url>/<key>`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    // == Fetch ==
    /// Fetches the image for a key from the upstream provider.
    ///
    /// The response body is taken as binary image data regardless of its
    /// declared content type. Fails with `Upstream` on any network error,
    /// non-success status, or empty body. Never touches the cache store.
    pub async fn fetch(&self, key: &CacheKey) -> Result<Bytes> {
        let url = format!("{}/{}", self.base_url, key);
        debug!(key = %key, url = %url, "fetching image from upstream");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.upstream_error(key, format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(key = %key, status = %status, "upstream returned non-success status");
            return Err(self.upstream_error(key, format!("upstream returned status {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.upstream_error(key, format!("body read failed: {err}")))?;

        if bytes.is_empty() {
            return Err(self.upstream_error(key, "upstream returned an empty body".to_string()));
        }

        debug!(key = %key, bytes = bytes.len(), "fetched image from upstream");
        Ok(bytes)
    }

    fn upstream_error(&self, key: &CacheKey, reason: String) -> ProxyError {
        ProxyError::Upstream {
            key: key.to_string(),
            reason,
        }
    }
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new(DEFAULT_UPSTREAM_URL)
    }
}
