//! Security subsystem: the edge authorization gate.
//!
//! # Data Flow
//! ```text
//! Every inbound request
//!     → gate.rs (orchestration)
//!         → rules.rs (open-route classification, pure, no I/O)
//!         → bearer.rs (credential extraction, pure, no I/O)
//!         → delegate.rs (validation call to the auth service)
//!     → Allow (continue, id-account attached on secured success)
//!     → Reject (error.rs maps every failure to one HTTP status)
//!
//! cors.rs is an independent cross-cutting layer, not part of the
//! authorization decision.
//! ```
//!
//! # Design Decisions
//! - Default-secured: a route is open only if an allow-list rule says so
//! - All local checks run before the single outbound validation call
//! - No token caching, no local cryptography, no role decisions; the
//!   gate attaches identity and nothing more

pub mod bearer;
pub mod cors;
pub mod delegate;
pub mod error;
pub mod gate;
pub mod rules;

pub use delegate::{AccountIdentity, AuthClient};
pub use error::AuthError;
pub use gate::{authorization_gate, GateState, ACCOUNT_ID_HEADER};
pub use rules::{OpenRoute, RouteRules};
