//! Store Gateway library.
//!
//! Edge authorization gate for the store service mesh: classifies routes
//! as open or secured, validates bearer credentials with the auth
//! service, attaches the authenticated account to forwarded requests,
//! and dispatches authorized traffic to upstream services.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod meta;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
