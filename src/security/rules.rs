//! Open-route classification.
//!
//! # Responsibilities
//! - Hold the allow-list of routes reachable without authentication
//! - Decide for each (method, path) whether authentication is required
//!
//! # Design Decisions
//! - Typed rules (method + path + match kind) instead of parsed strings,
//!   so a malformed rule cannot exist at runtime
//! - Pure allow-list: no rule matches means the route is secured
//!   (fail-safe-closed, an empty list secures everything)
//! - Method comparison is case-insensitive; path comparison is literal
//!   (no trailing-slash normalization)
//! - Rules form a set: the result does not depend on their order

use axum::http::Method;

use crate::config::OpenRouteConfig;

/// Method constraint of an open-route rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodRule {
    /// Matches every HTTP method.
    Any,
    /// Matches one method, compared case-insensitively.
    Named(String),
}

impl MethodRule {
    /// Build a rule from a config string. `"ANY"` (any casing) is the
    /// wildcard; everything else is normalized to uppercase.
    pub fn parse(method: &str) -> Self {
        if method.eq_ignore_ascii_case("ANY") {
            MethodRule::Any
        } else {
            MethodRule::Named(method.to_ascii_uppercase())
        }
    }

    fn matches(&self, method: &Method) -> bool {
        match self {
            MethodRule::Any => true,
            MethodRule::Named(name) => name.eq_ignore_ascii_case(method.as_str()),
        }
    }
}

/// How an open-route path is compared against a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatch {
    /// Literal string equality.
    Exact,
    /// Request path must start with the rule path.
    Prefix,
}

/// One entry of the open-route allow-list.
#[derive(Debug, Clone)]
pub struct OpenRoute {
    pub method: MethodRule,
    pub path: String,
    pub match_kind: PathMatch,
}

impl OpenRoute {
    /// Exact-path rule for a single method.
    pub fn exact(method: &str, path: &str) -> Self {
        Self {
            method: MethodRule::parse(method),
            path: path.to_string(),
            match_kind: PathMatch::Exact,
        }
    }

    /// Prefix rule: any path under `path` matches.
    pub fn prefix(method: &str, path: &str) -> Self {
        Self {
            method: MethodRule::parse(method),
            path: path.to_string(),
            match_kind: PathMatch::Prefix,
        }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        let path_matches = match self.match_kind {
            PathMatch::Exact => path == self.path,
            PathMatch::Prefix => path.starts_with(&self.path),
        };
        path_matches && self.method.matches(method)
    }
}

/// Immutable open-route table, compiled once at startup and shared
/// read-only across all request handlers.
#[derive(Debug, Clone)]
pub struct RouteRules {
    rules: Vec<OpenRoute>,
}

impl RouteRules {
    pub fn new(rules: Vec<OpenRoute>) -> Self {
        Self { rules }
    }

    /// Compile typed rules from their config representation.
    pub fn from_config(configs: &[OpenRouteConfig]) -> Self {
        let rules = configs
            .iter()
            .map(|c| OpenRoute {
                method: MethodRule::parse(&c.method),
                path: c.path.clone(),
                match_kind: if c.prefix { PathMatch::Prefix } else { PathMatch::Exact },
            })
            .collect();
        Self { rules }
    }

    /// Returns true if the route requires an authenticated identity.
    /// Open iff any rule matches; everything else is secured.
    pub fn is_secured(&self, method: &Method, path: &str) -> bool {
        !self.rules.iter().any(|rule| rule.matches(method, path))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RouteRules {
    /// The gateway's stock allow-list: credential endpoints on the auth
    /// service plus the informational endpoints served locally.
    fn default() -> Self {
        Self::new(vec![
            OpenRoute::exact("POST", "/auth/register"),
            OpenRoute::exact("POST", "/auth/login"),
            OpenRoute::exact("GET", "/health"),
            OpenRoute::exact("GET", "/info"),
            OpenRoute::exact("GET", "/"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_open() {
        let rules = RouteRules::default();
        assert!(!rules.is_secured(&Method::POST, "/auth/register"));
        assert!(!rules.is_secured(&Method::POST, "/auth/login"));
        assert!(!rules.is_secured(&Method::GET, "/health"));
        assert!(!rules.is_secured(&Method::GET, "/info"));
        assert!(!rules.is_secured(&Method::GET, "/"));
    }

    #[test]
    fn test_unlisted_routes_are_secured() {
        let rules = RouteRules::default();
        assert!(rules.is_secured(&Method::GET, "/store/products"));
        assert!(rules.is_secured(&Method::POST, "/orders"));
        // Same path, different method
        assert!(rules.is_secured(&Method::GET, "/auth/register"));
        assert!(rules.is_secured(&Method::DELETE, "/health"));
    }

    #[test]
    fn test_method_match_is_case_insensitive() {
        let rules = RouteRules::new(vec![OpenRoute::exact("get", "/health")]);
        assert!(!rules.is_secured(&Method::GET, "/health"));

        let rules = RouteRules::new(vec![OpenRoute::exact("GeT", "/health")]);
        assert!(!rules.is_secured(&Method::GET, "/health"));
    }

    #[test]
    fn test_any_method_wildcard() {
        let rules = RouteRules::new(vec![OpenRoute::exact("ANY", "/ping")]);
        assert!(!rules.is_secured(&Method::GET, "/ping"));
        assert!(!rules.is_secured(&Method::POST, "/ping"));
        assert!(!rules.is_secured(&Method::DELETE, "/ping"));
        assert!(rules.is_secured(&Method::GET, "/pong"));
    }

    #[test]
    fn test_exact_match_is_literal() {
        let rules = RouteRules::new(vec![OpenRoute::exact("GET", "/health")]);
        // No trailing-slash normalization, no prefix semantics
        assert!(rules.is_secured(&Method::GET, "/health/"));
        assert!(rules.is_secured(&Method::GET, "/healthz"));
        assert!(rules.is_secured(&Method::GET, "/health/live"));
    }

    #[test]
    fn test_prefix_match() {
        let rules = RouteRules::new(vec![OpenRoute::prefix("GET", "/public/")]);
        assert!(!rules.is_secured(&Method::GET, "/public/css/site.css"));
        assert!(!rules.is_secured(&Method::GET, "/public/"));
        assert!(rules.is_secured(&Method::GET, "/public"));
        assert!(rules.is_secured(&Method::GET, "/private/file"));
    }

    #[test]
    fn test_empty_table_secures_everything() {
        let rules = RouteRules::new(Vec::new());
        assert!(rules.is_secured(&Method::GET, "/"));
        assert!(rules.is_secured(&Method::GET, "/health"));
    }

    #[test]
    fn test_rule_order_is_irrelevant() {
        let a = RouteRules::new(vec![
            OpenRoute::exact("GET", "/a"),
            OpenRoute::prefix("ANY", "/b/"),
        ]);
        let b = RouteRules::new(vec![
            OpenRoute::prefix("ANY", "/b/"),
            OpenRoute::exact("GET", "/a"),
        ]);
        for (method, path) in [
            (Method::GET, "/a"),
            (Method::POST, "/b/c"),
            (Method::GET, "/c"),
        ] {
            assert_eq!(a.is_secured(&method, path), b.is_secured(&method, path));
        }
    }

    #[test]
    fn test_classification_is_idempotent() {
        let rules = RouteRules::default();
        let first = rules.is_secured(&Method::GET, "/store/items");
        for _ in 0..10 {
            assert_eq!(rules.is_secured(&Method::GET, "/store/items"), first);
        }
    }
}
