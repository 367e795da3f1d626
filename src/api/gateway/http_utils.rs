//! Shared response handling for the HTTP gateway implementations.

use http::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::api::token::TokenStore;

use super::error_mapping::{map_status_error, map_transport_error};

/// Longest body prefix quoted when a response is not JSON.
const BODY_SNIPPET_CHARS: usize = 100;

/// Attaches the stored bearer token to a request when one is present.
pub(super) fn with_bearer(request: RequestBuilder, tokens: &dyn TokenStore) -> RequestBuilder {
    let Some(token) = tokens.current() else {
        return request;
    };
    request.bearer_auth(token.value())
}

/// Sends a request and decodes the JSON response body.
///
/// # Errors
///
/// Returns [`ApiError::Network`] when the request cannot be sent, otherwise
/// whatever [`decode_json_response`] reports.
pub(super) async fn execute_json<T>(
    operation: &str,
    request: RequestBuilder,
) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let response = request
        .send()
        .await
        .map_err(|error| map_transport_error(operation, &error))?;
    decode_json_response(operation, response).await
}

/// Decodes a JSON API response, applying the shared failure mapping.
///
/// Responses are rejected in a fixed order: bodies that are not JSON first,
/// then non-success statuses, then payloads that do not match the expected
/// shape. A proxy error page therefore surfaces as a protocol error rather
/// than a confusing decode failure.
///
/// # Errors
///
/// Returns [`ApiError::Network`] when the body cannot be read,
/// [`ApiError::Protocol`] for non-JSON or malformed payloads, and the mapped
/// status error for non-success responses.
pub(super) async fn decode_json_response<T>(
    operation: &str,
    response: Response,
) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let endpoint = response.url().path().to_owned();
    let content_type = header_to_string(response.headers().get(CONTENT_TYPE));
    let body = response
        .text()
        .await
        .map_err(|error| map_transport_error(operation, &error))?;

    if !is_json_content_type(content_type.as_deref()) {
        let label = content_type.as_deref().unwrap_or("no content type");
        return Err(ApiError::Protocol {
            message: format!(
                "{operation} expected JSON but received {label}: {snippet}",
                snippet = body_snippet(&body)
            ),
        });
    }

    if !status.is_success() {
        return Err(map_status_error(
            status,
            extract_server_message(&body),
            &endpoint,
        ));
    }

    serde_json::from_str(&body).map_err(|error| ApiError::Protocol {
        message: format!("{operation} returned an unexpected payload: {error}"),
    })
}

/// Rejects write acknowledgements the server flagged as unsuccessful.
///
/// An absent `success` field counts as accepted: the status code already
/// vouched for the response.
pub(super) fn ensure_acknowledged(
    success: Option<bool>,
    message: Option<&str>,
    fallback: &str,
) -> Result<(), ApiError> {
    if success.unwrap_or(true) {
        return Ok(());
    }
    Err(ApiError::Rejected {
        message: message.unwrap_or(fallback).to_owned(),
    })
}

/// Extracts the server's failure description from a JSON error body.
///
/// The backend reports failures under either `message` or `error`.
pub(super) fn extract_server_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(ToOwned::to_owned)
}

fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|value| value.contains("application/json"))
}

fn body_snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}

fn header_to_string(header_value: Option<&HeaderValue>) -> Option<String> {
    header_value
        .and_then(|raw| raw.to_str().ok())
        .map(ToOwned::to_owned)
}
