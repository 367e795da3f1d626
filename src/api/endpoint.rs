//! Validated identity wrappers for the site API: base URL and access token.

use url::Url;

use super::error::ApiError;

/// Validated base URL for the site's REST API.
///
/// Endpoint paths are appended to the base by plain concatenation, so a base
/// of `https://example.com/site` combined with `/api/reviews` addresses
/// `https://example.com/site/api/reviews`. Trailing slashes are trimmed at
/// construction so concatenation cannot produce doubled separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBaseUrl(String);

impl ApiBaseUrl {
    /// Parses and validates a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] when the value does not parse as
    /// a URL, uses a scheme other than `http` or `https`, or lacks a host.
    ///
    /// # Examples
    ///
    /// ```
    /// use vitrine::api::ApiBaseUrl;
    ///
    /// let base = ApiBaseUrl::parse("https://example.com/").expect("base URL should be accepted");
    /// assert_eq!(base.as_str(), "https://example.com");
    /// ```
    pub fn parse(input: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(input).map_err(|error| ApiError::InvalidBaseUrl {
            url: input.to_owned(),
            reason: error.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl {
                url: input.to_owned(),
                reason: format!("unsupported scheme '{scheme}'", scheme = parsed.scheme()),
            });
        }

        if parsed.host_str().is_none() {
            return Err(ApiError::InvalidBaseUrl {
                url: input.to_owned(),
                reason: "URL must include a host".to_owned(),
            });
        }

        Ok(Self(input.trim_end_matches('/').to_owned()))
    }

    /// Borrow the normalised base URL value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Builds the absolute URL for an endpoint path such as `/api/reviews`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] when the combined value does not
    /// parse as a URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let combined = format!("{base}{path}", base = self.0);
        Url::parse(&combined).map_err(|error| ApiError::InvalidBaseUrl {
            url: combined,
            reason: error.to_string(),
        })
    }
}

impl AsRef<str> for ApiBaseUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Bearer token issued by the auth API.
///
/// Construction trims surrounding whitespace and rejects blank values, so a
/// stored token is always usable in an `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Validates and normalises a raw token value.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingToken`] when the supplied value is empty
    /// or contains only whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use vitrine::api::AccessToken;
    ///
    /// let token = AccessToken::new("  abc123  ").expect("token should be accepted");
    /// assert_eq!(token.value(), "abc123");
    /// ```
    pub fn new(token: impl AsRef<str>) -> Result<Self, ApiError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ApiError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}
