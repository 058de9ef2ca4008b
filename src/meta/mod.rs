//! Informational endpoints served by the gateway itself.
//!
//! Service identity, liveness and host metadata. These paths are in the
//! default open-route table; they never require authentication.

pub mod handlers;

use axum::{routing::get, Router};

use self::handlers::*;

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_root))
        .route("/health", get(get_health))
        .route("/info", get(get_info))
}
