//! API Handlers
//!
//! HTTP request handlers for the caching proxy: key validation, method
//! dispatch, and the miss-path composition of fetcher and store.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, CacheStore};
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::HealthResponse;
use crate::upstream::UpstreamClient;

/// Application state shared across all handlers.
///
/// The store and fetcher are shared without locks; the filesystem is the
/// only shared mutable resource.
#[derive(Clone)]
pub struct AppState {
    /// On-disk image cache
    pub cache: Arc<CacheStore>,
    /// Client for the upstream image provider
    pub upstream: Arc<UpstreamClient>,
    /// Server start time, reported by the health endpoint
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates a new AppState from an initialized store and fetcher.
    pub fn new(cache: CacheStore, upstream: UpstreamClient) -> Self {
        Self {
            cache: Arc::new(cache),
            upstream: Arc::new(upstream),
            started_at: Utc::now(),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Creates the cache directory; a failure here is fatal and must abort
    /// startup before the server accepts connections.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let mut cache = CacheStore::new(&config.cache_dir);
        cache.init().await?;
        Ok(Self::new(cache, UpstreamClient::new(config.upstream_url.as_str())))
    }
}

/// Handler for GET /:code
///
/// Serves the image from the cache; on a miss, fetches it from the
/// upstream provider, stores it, and serves the fetched bytes.
pub async fn get_image(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
) -> Result<Response> {
    let key = CacheKey::parse(&raw_key)?;

    match state.cache.get(&key).await {
        Ok(data) => {
            debug!(key = %key, "cache hit");
            Ok(image_response(data, "HIT"))
        }
        Err(ProxyError::NotFound(_)) => {
            info!(key = %key, "cache miss, fetching from upstream");
            let data = match state.upstream.fetch(&key).await {
                Ok(data) => data,
                Err(err) => {
                    // The cache stays untouched: misses are not cached.
                    warn!(key = %key, error = %err, "upstream fetch failed");
                    return Err(err);
                }
            };
            // A write failure after a successful fetch is a server fault,
            // reported as 500 rather than the fetch-failure 404.
            state.cache.put(&key, &data).await?;
            Ok(image_response(data, "MISS"))
        }
        Err(err) => Err(err),
    }
}

/// Handler for PUT /:code
///
/// Stores the request body as the cached image for the key.
pub async fn put_image(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, String)> {
    let key = CacheKey::parse(&raw_key)?;

    if body.is_empty() {
        return Err(ProxyError::EmptyBody);
    }

    state.cache.put(&key, &body).await?;
    info!(key = %key, bytes = body.len(), "image stored via PUT");
    Ok((
        StatusCode::CREATED,
        format!("Image for {key} cached successfully."),
    ))
}

/// Handler for DELETE /:code
///
/// Evicts the cached image for the key.
pub async fn delete_image(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
) -> Result<(StatusCode, String)> {
    let key = CacheKey::parse(&raw_key)?;

    state.cache.delete(&key).await?;
    info!(key = %key, "image deleted from cache");
    Ok((StatusCode::OK, format!("Image for {key} deleted from cache.")))
}

/// Fallback for unsupported methods on /:code
///
/// The key is still validated first, so a malformed key answers 400 for
/// every method; a valid key answers 405 with the Allow header.
pub async fn method_not_allowed(Path(raw_key): Path<String>) -> ProxyError {
    match CacheKey::parse(&raw_key) {
        Ok(_) => ProxyError::MethodNotAllowed,
        Err(err) => err,
    }
}

/// Router-level fallback for paths that carry no single key segment
/// (e.g. `/` or `/200/extra`).
pub async fn invalid_path(uri: Uri) -> ProxyError {
    ProxyError::InvalidKey(uri.path().to_string())
}

/// Handler for GET /health
///
/// Returns server status, uptime, and cache statistics.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.started_at, state.cache.stats()))
}

fn image_response(data: Bytes, cache_status: &'static str) -> Response {
    (
        [("content-type", "image/jpeg"), ("x-cache", cache_status)],
        data,
    )
        .into_response()
}
