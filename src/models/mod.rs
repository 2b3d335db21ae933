//! Response models for the caching proxy API
//!
//! Image and error responses are raw bytes and plain text; only the health
//! endpoint carries a structured body.

pub mod responses;

pub use responses::HealthResponse;
