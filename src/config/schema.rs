//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from config
//! files; every section has defaults so a minimal (or absent) config file
//! yields a working gateway.

use serde::{Deserialize, Serialize};

/// Root configuration for the store gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Auth service delegation settings.
    pub auth: AuthConfig,

    /// Routes reachable without authentication.
    pub open_routes: Vec<OpenRouteConfig>,

    /// Upstream services requests are dispatched to once authorized.
    pub upstreams: Vec<UpstreamConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Cross-origin policy.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            auth: AuthConfig::default(),
            open_routes: default_open_routes(),
            upstreams: default_upstreams(),
            timeouts: TimeoutConfig::default(),
            cors: CorsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Auth service delegation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Base URL of the authentication service. The validation endpoint
    /// lives at `{service_url}/auth/solve`.
    pub service_url: String,

    /// Timeout for one validation call, in seconds.
    pub timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            service_url: "http://auth:8080".to_string(),
            timeout_secs: 5,
        }
    }
}

/// One entry of the open-route allow-list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenRouteConfig {
    /// HTTP method, or "ANY" to match all methods. Case-insensitive.
    pub method: String,

    /// Path to match. Literal unless `prefix` is set.
    pub path: String,

    /// Treat `path` as a prefix instead of an exact match.
    #[serde(default)]
    pub prefix: bool,
}

/// Routes reachable without authentication when no config file overrides
/// them. These exact values are load-bearing for compatibility with the
/// services behind the gateway.
fn default_open_routes() -> Vec<OpenRouteConfig> {
    [
        ("POST", "/auth/register"),
        ("POST", "/auth/login"),
        ("GET", "/health"),
        ("GET", "/info"),
        ("GET", "/"),
    ]
    .into_iter()
    .map(|(method, path)| OpenRouteConfig {
        method: method.to_string(),
        path: path.to_string(),
        prefix: false,
    })
    .collect()
}

/// Upstream service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Upstream identifier for logging/metrics.
    pub name: String,

    /// Path prefix dispatched to this upstream.
    pub path_prefix: String,

    /// Upstream authority (e.g., "auth:8080").
    pub address: String,
}

fn default_upstreams() -> Vec<UpstreamConfig> {
    vec![
        UpstreamConfig {
            name: "auth".to_string(),
            path_prefix: "/auth".to_string(),
            address: "auth:8080".to_string(),
        },
        UpstreamConfig {
            name: "store".to_string(),
            path_prefix: "/store".to_string(),
            address: "store:8080".to_string(),
        },
    ]
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Cross-origin policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Apply the permissive CORS layer to all paths.
    pub enabled: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
