//! Admin session management over the auth gateway.

use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::gateway::AuthGateway;
use crate::api::models::Credentials;
use crate::api::token::TokenStore;

/// Login state and token custody for the admin panel.
///
/// The session owns nothing but references: the token lives in the shared
/// [`TokenStore`], so authenticated gateways pick it up without further
/// wiring.
pub struct AdminSession {
    gateway: Arc<dyn AuthGateway>,
    tokens: Arc<dyn TokenStore>,
}

impl AdminSession {
    /// Creates a session over the given gateway and token store.
    #[must_use]
    pub fn new(gateway: Arc<dyn AuthGateway>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { gateway, tokens }
    }

    /// Logs in and stores the issued session token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the server declines the
    /// credentials, and the usual network, HTTP, and protocol failures
    /// otherwise. No token is stored on failure.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let receipt = self.gateway.login(credentials).await?;
        self.tokens.store(receipt.token);
        Ok(())
    }

    /// Asks the server whether the stored session token is still honoured.
    ///
    /// A missing token short-circuits to `Ok(false)` without a network
    /// call. A server answer of `Ok(false)` keeps the token: the session
    /// may simply not be live yet.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures. The stored token is cleared first, so a
    /// broken session cannot be replayed.
    pub async fn validate(&self) -> Result<bool, ApiError> {
        if self.tokens.current().is_none() {
            return Ok(false);
        }
        match self.gateway.validate_session().await {
            Ok(valid) => Ok(valid),
            Err(error) => {
                self.tokens.clear();
                Err(error)
            }
        }
    }

    /// Like [`validate`](Self::validate), mapping any failure to `false`.
    pub async fn check_auth(&self) -> bool {
        match self.validate().await {
            Ok(valid) => valid,
            Err(error) => {
                tracing::warn!("session validation failed: {error}");
                false
            }
        }
    }

    /// Discards the stored token locally; no network call is made.
    pub fn logout(&self) {
        self.tokens.clear();
    }

    /// Whether a token is currently stored.
    ///
    /// This reports local presence only; use
    /// [`validate`](Self::validate) to consult the server.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens.current().is_some()
    }
}
