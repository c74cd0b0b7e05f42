//! General-purpose middleware for the API.
//!
//! Only CORS lives here: the dashboard consuming this API is served from other
//! origins, so every origin, method and header is allowed.

use tower_http::cors::{Any, CorsLayer};

/// Wildcard CORS. Credentials stay disabled because browsers reject them
/// together with `*` origins.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
