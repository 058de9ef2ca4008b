//! Cross-origin policy.
//!
//! Applied uniformly to all paths, outside the authorization gate, so
//! preflight requests are answered without consulting it. Wide open by
//! default: all origins, methods and headers, credentials disabled.
//! Lock this down per deployment before exposing the gateway publicly.

use tower_http::cors::{Any, CorsLayer};

/// Build the gateway's CORS layer.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
