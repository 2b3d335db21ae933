//! API Module
//!
//! HTTP handlers and routing for the caching proxy.
//!
//! # Endpoints
//! - `GET /:code` - Serve an image from cache, fetching upstream on miss
//! - `PUT /:code` - Store the request body as the cached image
//! - `DELETE /:code` - Evict a cached image
//! - `GET /health` - Server status and cache statistics

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
