//! Error types exposed by the REST API layer.

use thiserror::Error;

/// Errors surfaced while validating input or communicating with the site API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The configured API base URL could not be used.
    #[error("API base URL '{url}' is invalid: {reason}")]
    InvalidBaseUrl {
        /// The rejected base URL value.
        url: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// An operation that requires authentication ran without a stored token.
    #[error("authentication required: no access token is stored")]
    MissingToken,

    /// A review rating fell outside the accepted range.
    #[error("rating {rating} is out of range: ratings run from 1 to 5")]
    InvalidRating {
        /// The rejected rating value.
        rating: u8,
    },

    /// A required submission field was blank.
    #[error("{field} must not be empty")]
    MissingField {
        /// Name of the blank field.
        field: String,
    },

    /// The server answered 401: the session is missing or expired.
    #[error("authentication required: please log in again")]
    AuthenticationRequired,

    /// The server answered 403: the current session may not perform this
    /// action.
    #[error("permission denied for this action")]
    PermissionDenied,

    /// The server answered 404 for the requested route.
    #[error("API endpoint '{endpoint}' was not found")]
    EndpointNotFound {
        /// Path of the missing route.
        endpoint: String,
    },

    /// The server answered with a 5xx status.
    #[error("server error {status}: try again later")]
    ServerUnavailable {
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// The server answered with an unexpected non-success status.
    #[error("request failed with status {status}: {message}")]
    Http {
        /// HTTP status code returned by the server.
        status: u16,
        /// Server-provided failure description, or "unknown error".
        message: String,
    },

    /// The server acknowledged the request but declined to apply it.
    #[error("request declined: {message}")]
    Rejected {
        /// Server-provided reason for declining.
        message: String,
    },

    /// Networking failed before any response arrived.
    #[error("network error talking to the site API: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The response was not in the expected structured shape.
    #[error("unexpected response: {message}")]
    Protocol {
        /// Description of what was received instead.
        message: String,
    },
}
