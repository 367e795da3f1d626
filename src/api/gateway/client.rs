//! HTTP client construction shared by the gateway implementations.

use reqwest::Client;

use crate::api::error::ApiError;

const USER_AGENT: &str = concat!("vitrine/", env!("CARGO_PKG_VERSION"));

/// Builds the reqwest client used by the HTTP gateways.
///
/// The client carries the crate's user agent and sets no request timeout:
/// in-flight calls are never cancelled, and overlapping refreshes resolve by
/// whichever response lands last.
///
/// # Errors
///
/// Returns [`ApiError::Network`] when the TLS backend cannot be initialised.
pub(super) fn build_http_client() -> Result<Client, ApiError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|error| ApiError::Network {
            message: format!("could not build HTTP client: {error}"),
        })
}
