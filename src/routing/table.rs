//! Upstream dispatch table.
//!
//! # Responsibilities
//! - Store compiled upstream routes
//! - Look up the upstream serving a request path
//! - Return matched upstream or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan, first match in declared order; list more
//!   specific prefixes first
//! - No regex to guarantee O(n) matching

use axum::http::uri::Authority;

use crate::config::UpstreamConfig;

/// One compiled upstream route.
#[derive(Debug, Clone)]
pub struct UpstreamRoute {
    /// Identifier for logging/metrics.
    pub name: String,
    /// Path prefix dispatched to this upstream.
    pub path_prefix: String,
    /// Authority requests are rewritten to.
    pub authority: Authority,
}

/// Immutable table mapping path prefixes to upstream services.
#[derive(Debug, Clone, Default)]
pub struct UpstreamTable {
    routes: Vec<UpstreamRoute>,
}

impl UpstreamTable {
    /// Compile the table from configuration. Entries whose address does
    /// not parse as an authority are skipped with a warning; semantic
    /// validation reports them before startup gets this far.
    pub fn from_config(configs: &[UpstreamConfig]) -> Self {
        let mut routes = Vec::with_capacity(configs.len());
        for config in configs {
            match config.address.parse::<Authority>() {
                Ok(authority) => routes.push(UpstreamRoute {
                    name: config.name.clone(),
                    path_prefix: config.path_prefix.clone(),
                    authority,
                }),
                Err(e) => {
                    tracing::warn!(
                        upstream = %config.name,
                        address = %config.address,
                        error = %e,
                        "Ignoring upstream with invalid address"
                    );
                }
            }
        }
        Self { routes }
    }

    /// Find the upstream serving a path. First match in declared order.
    pub fn match_path(&self, path: &str) -> Option<&UpstreamRoute> {
        self.routes.iter().find(|r| path.starts_with(&r.path_prefix))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
