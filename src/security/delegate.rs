//! Delegated credential validation.
//!
//! # Responsibilities
//! - Hand the raw bearer token to the auth service for verification
//! - Translate the reply into an authenticated identity or a typed failure
//! - Bound the call with the configured timeout
//!
//! # Design Decisions
//! - Exactly one attempt per request; retry policy belongs to callers
//! - Client handle is built once at startup with an explicit timeout and
//!   cloned per call (connection pooling lives inside reqwest)
//! - An unreachable service and an explicit rejection both surface as the
//!   same failure to the caller; only logs and metrics tell them apart
//! - The token value never appears in log output

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::AuthConfig;
use crate::security::error::AuthError;

/// Path of the validation endpoint on the auth service.
const SOLVE_PATH: &str = "/auth/solve";

/// Identity asserted by the auth service for a validated credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountIdentity {
    pub account_id: String,
}

/// Request body of the validation call.
#[derive(Debug, Serialize)]
struct TokenOut<'a> {
    token: &'a str,
}

/// Response body of the validation call.
#[derive(Debug, Deserialize)]
struct SolveReply {
    #[serde(rename = "idAccount")]
    id_account: String,
}

/// Errors building the delegate client at startup.
#[derive(Debug, Error)]
pub enum DelegateSetupError {
    #[error("invalid auth service URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Client handle for the external auth service.
#[derive(Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    solve_url: Url,
}

impl AuthClient {
    /// Build the client from configuration. The timeout covers the whole
    /// call, connect included.
    pub fn new(config: &AuthConfig) -> Result<Self, DelegateSetupError> {
        let base: Url = config.service_url.parse()?;
        let solve_url = base.join(SOLVE_PATH)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        tracing::info!(
            solve_url = %solve_url,
            timeout_secs = config.timeout_secs,
            "Auth delegate client initialized"
        );

        Ok(Self { client, solve_url })
    }

    /// Validate a credential with the auth service.
    ///
    /// Suspends for at most the configured timeout. Dropping the returned
    /// future cancels the outbound call.
    pub async fn validate(&self, token: &str) -> Result<AccountIdentity, AuthError> {
        let response = self
            .client
            .post(self.solve_url.clone())
            .json(&TokenOut { token })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::error!(error = %e, "Auth service call timed out");
                } else {
                    tracing::error!(error = %e, "Auth service unreachable");
                }
                AuthError::DelegateFailure
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Auth service refused the validation call");
            return Err(AuthError::DelegateFailure);
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read auth service response");
            AuthError::DelegateFailure
        })?;

        // A successful call with nothing to say is a rejection, not an outage
        if body.is_empty() {
            tracing::warn!("Auth service returned an empty body");
            return Err(AuthError::InvalidCredential);
        }

        let reply: SolveReply = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(error = %e, "Unusable auth service response body");
            AuthError::DelegateFailure
        })?;

        tracing::debug!(account_id = %reply.id_account, "Credential validated");

        Ok(AccountIdentity {
            account_id: reply.id_account,
        })
    }

    /// Endpoint this client validates against.
    pub fn solve_url(&self) -> &Url {
        &self.solve_url
    }
}
