//! Site client configuration.
//!
//! # Precedence
//!
//! The API base URL resolves with the following precedence (highest to
//! lowest):
//!
//! 1. **Explicit value** set on [`SiteConfig::api_base_url`]
//! 2. **Environment variable** `VITRINE_API_BASE_URL`
//! 3. **Default** `http://localhost:3000` (the local development backend)

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::endpoint::ApiBaseUrl;
use crate::api::error::ApiError;

/// Environment variable consulted when no explicit base URL is set.
pub const API_BASE_URL_ENV: &str = "VITRINE_API_BASE_URL";

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_POLL_INTERVAL_MS: u64 = 30_000;
const DEFAULT_RECONCILE_DELAY_MS: u64 = 1_000;

/// Settings for wiring up the site client.
///
/// # Examples
///
/// ```
/// use vitrine::config::SiteConfig;
///
/// let config = SiteConfig::default();
/// assert_eq!(config.poll_interval().as_secs(), 30);
/// assert_eq!(config.reconcile_delay().as_millis(), 1_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Explicit API base URL, overriding the environment and the default.
    pub api_base_url: Option<String>,

    /// Period between background review refreshes, in milliseconds.
    pub poll_interval_ms: u64,

    /// Delay before the reconciling refresh that follows a submission, in
    /// milliseconds.
    pub reconcile_delay_ms: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            reconcile_delay_ms: DEFAULT_RECONCILE_DELAY_MS,
        }
    }
}

impl SiteConfig {
    /// Resolves the API base URL from configuration or the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] when the winning value does not
    /// parse as an http(s) URL.
    pub fn resolve_api_base_url(&self) -> Result<ApiBaseUrl, ApiError> {
        let candidate = self
            .api_base_url
            .clone()
            .or_else(|| env::var(API_BASE_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        ApiBaseUrl::parse(&candidate)
    }

    /// Period between background review refreshes.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Delay before the reconciling refresh that follows a submission.
    #[must_use]
    pub const fn reconcile_delay(&self) -> Duration {
        Duration::from_millis(self.reconcile_delay_ms)
    }
}
