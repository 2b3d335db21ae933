//! Response DTOs for the caching proxy API
//!
//! Defines the structure of the health endpoint body.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::StatsSnapshot;

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "ok")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Seconds since the server started
    pub uptime_secs: u64,
    /// Cache hit/miss counters
    pub cache: StatsSnapshot,
}

impl HealthResponse {
    /// Creates a new HealthResponse with the current timestamp.
    pub fn healthy(started_at: DateTime<Utc>, cache: StatsSnapshot) -> Self {
        let now = Utc::now();
        Self {
            status: "ok".to_string(),
            timestamp: now.to_rfc3339(),
            uptime_secs: (now - started_at).num_seconds().max(0) as u64,
            cache,
        }
    }
}
