//! Failure mapping shared by the HTTP gateway implementations.

use http::StatusCode;

use crate::api::error::ApiError;

/// Maps a non-success HTTP status onto the API error taxonomy.
///
/// Statuses with a dedicated meaning (401, 403, 404, and the 5xx range) map
/// to their own variants; anything else keeps the server's message, falling
/// back to "unknown error" when the body carried none.
pub(super) fn map_status_error(
    status: StatusCode,
    server_message: Option<String>,
    endpoint: &str,
) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::AuthenticationRequired,
        StatusCode::FORBIDDEN => ApiError::PermissionDenied,
        StatusCode::NOT_FOUND => ApiError::EndpointNotFound {
            endpoint: endpoint.to_owned(),
        },
        other if other.is_server_error() => ApiError::ServerUnavailable {
            status: other.as_u16(),
        },
        other => ApiError::Http {
            status: other.as_u16(),
            message: server_message.unwrap_or_else(|| "unknown error".to_owned()),
        },
    }
}

/// Maps a reqwest transport failure onto the API error taxonomy.
pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> ApiError {
    ApiError::Network {
        message: format!("{operation} failed: {error}"),
    }
}
