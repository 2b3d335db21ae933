//! Statuscat - a caching HTTP proxy for status code images
//!
//! Serves status-code images from an on-disk cache, falling back to a
//! remote image provider on a cache miss.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
