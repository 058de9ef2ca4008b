//! Authorization gate middleware.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → rules.rs (open or secured?)
//!         open    → continue unchanged
//!         secured → bearer.rs (extract credential)
//!                 → delegate.rs (validate with auth service)
//!                 → attach id-account header → continue
//!     any failure → terminal rejection (status + message)
//! ```
//!
//! # Design Decisions
//! - Runs as an axum middleware ahead of every handler, including the
//!   proxy dispatch, so no backend sees an unauthenticated secured request
//! - Exactly one outbound validation call per secured request; none at all
//!   when extraction already failed
//! - The gate's id-account value overwrites any caller-supplied header of
//!   the same name, closing the identity-spoofing hole
//! - Client disconnects drop this future and cancel the in-flight
//!   validation call with it

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::observability::metrics;
use crate::security::bearer::extract_bearer;
use crate::security::delegate::AuthClient;
use crate::security::error::AuthError;
use crate::security::rules::RouteRules;

/// Header conveying the authenticated account to downstream services.
pub const ACCOUNT_ID_HEADER: &str = "id-account";

/// State required by the gate.
#[derive(Clone)]
pub struct GateState {
    pub rules: Arc<RouteRules>,
    pub delegate: AuthClient,
}

pub async fn authorization_gate(
    State(state): State<GateState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    // 1. Classify the route
    if !state.rules.is_secured(&method, &path) {
        tracing::debug!(method = %method, path = %path, "Route is open, bypassing authentication");
        metrics::record_gate_outcome("open");
        return next.run(req).await;
    }

    // 2. Extract the bearer credential. Fails locally, before any
    //    network traffic.
    let token = match extract_bearer(req.headers()) {
        Ok(token) => token.to_owned(),
        Err(err) => return reject(&method, &path, err),
    };

    // 3. Delegate validation, the only suspension point
    let identity = match state.delegate.validate(&token).await {
        Ok(identity) => identity,
        Err(err) => return reject(&method, &path, err),
    };

    // 4. Attach the identity. insert() replaces any caller-supplied value
    //    under the same name.
    let value = match HeaderValue::from_str(&identity.account_id) {
        Ok(value) => value,
        Err(_) => {
            tracing::error!(
                method = %method,
                path = %path,
                "Auth service returned an account id that is not a valid header value"
            );
            return reject(&method, &path, AuthError::InvalidCredential);
        }
    };
    req.headers_mut().insert(ACCOUNT_ID_HEADER, value);

    metrics::record_gate_outcome("allowed");
    next.run(req).await
}

/// Terminal rejection: log with route context, count it, answer the caller.
fn reject(method: &Method, path: &str, err: AuthError) -> Response {
    tracing::warn!(
        method = %method,
        path = %path,
        kind = err.kind(),
        status = %err.status(),
        "Request rejected by authorization gate"
    );
    metrics::record_gate_outcome(err.kind());
    err.into_response()
}
