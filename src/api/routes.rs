//! API Routes
//!
//! Configures the Axum router for the caching proxy.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_image, get_image, health_handler, invalid_path, method_not_allowed, put_image, AppState,
};

/// Creates the main router.
///
/// # Endpoints
/// - `GET /:code` - Serve the image from cache, fetching upstream on miss
/// - `PUT /:code` - Store the request body as the cached image
/// - `DELETE /:code` - Evict the cached image
/// - `GET /health` - Server status and cache statistics
///
/// Other methods on `/:code` answer 405 with an `Allow` header; paths that
/// do not carry a single key segment answer 400.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/:code",
            get(get_image)
                .put(put_image)
                .delete(delete_image)
                .fallback(method_not_allowed),
        )
        .fallback(invalid_path)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
