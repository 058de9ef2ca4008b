//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0) and URL/authority shapes
//! - Catch rules that can never match before the gateway starts
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use axum::http::uri::Authority;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "auth.service_url").
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn error(field: impl Into<String>, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(error(
            "listener.bind_address",
            format!("not a socket address: '{}'", config.listener.bind_address),
        ));
    }

    match config.auth.service_url.parse::<Url>() {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(error(
            "auth.service_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(error("auth.service_url", format!("not a URL: {}", e))),
    }

    if config.auth.timeout_secs == 0 {
        errors.push(error("auth.timeout_secs", "must be greater than zero"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(error("timeouts.request_secs", "must be greater than zero"));
    }

    for (i, route) in config.open_routes.iter().enumerate() {
        if !route.path.starts_with('/') {
            errors.push(error(
                format!("open_routes[{}].path", i),
                format!("must start with '/': '{}'", route.path),
            ));
        }
        if route.method.is_empty() {
            errors.push(error(format!("open_routes[{}].method", i), "must not be empty"));
        }
    }

    for (i, upstream) in config.upstreams.iter().enumerate() {
        if !upstream.path_prefix.starts_with('/') {
            errors.push(error(
                format!("upstreams[{}].path_prefix", i),
                format!("must start with '/': '{}'", upstream.path_prefix),
            ));
        }
        if upstream.address.parse::<Authority>().is_err() {
            errors.push(error(
                format!("upstreams[{}].address", i),
                format!("not a host:port authority: '{}'", upstream.address),
            ));
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(error(
            "observability.metrics_address",
            format!(
                "not a socket address: '{}'",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.auth.service_url = "not a url".to_string();
        config.auth.timeout_secs = 0;
        config.open_routes[0].path = "auth/register".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == "auth.service_url"));
        assert!(errors.iter().any(|e| e.field == "auth.timeout_secs"));
        assert!(errors.iter().any(|e| e.field == "open_routes[0].path"));
    }

    #[test]
    fn test_bad_upstream_authority() {
        let mut config = GatewayConfig::default();
        config.upstreams[0].address = "http://auth:8080".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].field.starts_with("upstreams[0]"));
    }
}
