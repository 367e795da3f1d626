//! Login and session validation over the site's REST API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::api::endpoint::{AccessToken, ApiBaseUrl};
use crate::api::error::ApiError;
use crate::api::models::{ApiLoginResponse, ApiValidateResponse, Credentials, LoginReceipt};
use crate::api::token::TokenStore;

use super::AuthGateway;
use super::client::build_http_client;
use super::http_utils::{ensure_acknowledged, execute_json, with_bearer};

/// Route for exchanging credentials for a session token.
const LOGIN_PATH: &str = "/api/auth/login";
/// Route for checking whether the stored token is still honoured.
const VALIDATE_PATH: &str = "/api/auth/validate";

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// HTTP-backed auth gateway.
#[derive(Clone)]
pub struct HttpAuthGateway {
    client: Client,
    base: ApiBaseUrl,
    tokens: Arc<dyn TokenStore>,
}

impl HttpAuthGateway {
    /// Creates a gateway for the given API base URL and token store.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] when the shared HTTP client cannot be
    /// built.
    pub fn new(base: ApiBaseUrl, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_http_client()?,
            base,
            tokens,
        })
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: &Credentials) -> Result<LoginReceipt, ApiError> {
        let url = self.base.endpoint(LOGIN_PATH)?;
        let body = LoginBody {
            email: &credentials.email,
            password: &credentials.password,
        };
        let ApiLoginResponse {
            success,
            token,
            message,
        } = execute_json("login", self.client.post(url).json(&body)).await?;
        ensure_acknowledged(success, message.as_deref(), "invalid credentials")?;
        let raw_token = token.ok_or_else(|| ApiError::Protocol {
            message: "login succeeded without a session token".to_owned(),
        })?;
        let session_token = AccessToken::new(&raw_token).map_err(|_| ApiError::Protocol {
            message: "login succeeded with a blank session token".to_owned(),
        })?;
        Ok(LoginReceipt {
            token: session_token,
            message,
        })
    }

    async fn validate_session(&self) -> Result<bool, ApiError> {
        let url = self.base.endpoint(VALIDATE_PATH)?;
        let request = with_bearer(self.client.post(url), self.tokens.as_ref());
        let response: ApiValidateResponse = execute_json("validate session", request).await?;
        // A 2xx acknowledgement without an explicit flag does not prove the
        // session is live, so treat it as invalid.
        Ok(response.success.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::api::token::InMemoryTokenStore;

    use super::*;

    async fn gateway_for(server: &MockServer, tokens: Arc<InMemoryTokenStore>) -> HttpAuthGateway {
        let base = ApiBaseUrl::parse(&server.uri()).expect("mock server URI should parse");
        HttpAuthGateway::new(base, tokens).expect("gateway should build")
    }

    #[tokio::test]
    async fn login_posts_credentials_and_returns_the_issued_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({
                "email": "admin@example.com",
                "password": "hunter2"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "token": "session-token-1",
                "message": "Welcome back"
            })))
            .mount(&server)
            .await;
        let gateway = gateway_for(&server, Arc::new(InMemoryTokenStore::new())).await;
        let credentials = Credentials {
            email: "admin@example.com".to_owned(),
            password: "hunter2".to_owned(),
        };

        let receipt = gateway
            .login(&credentials)
            .await
            .expect("login should succeed");

        assert_eq!(receipt.token.value(), "session-token-1");
        assert_eq!(receipt.message.as_deref(), Some("Welcome back"));
    }

    #[tokio::test]
    async fn declined_login_surfaces_the_server_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Invalid credentials"
            })))
            .mount(&server)
            .await;
        let gateway = gateway_for(&server, Arc::new(InMemoryTokenStore::new())).await;
        let credentials = Credentials {
            email: "admin@example.com".to_owned(),
            password: "wrong".to_owned(),
        };

        let error = gateway
            .login(&credentials)
            .await
            .expect_err("declined login should be rejected");

        assert_eq!(
            error,
            ApiError::Rejected {
                message: "Invalid credentials".to_owned()
            }
        );
    }

    #[tokio::test]
    async fn login_without_a_token_is_a_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;
        let gateway = gateway_for(&server, Arc::new(InMemoryTokenStore::new())).await;
        let credentials = Credentials {
            email: "admin@example.com".to_owned(),
            password: "hunter2".to_owned(),
        };

        let error = gateway
            .login(&credentials)
            .await
            .expect_err("tokenless login should be rejected");

        assert!(
            matches!(error, ApiError::Protocol { .. }),
            "expected Protocol, got {error:?}"
        );
    }

    #[tokio::test]
    async fn validate_sends_the_stored_token_as_a_bearer_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/validate"))
            .and(header("authorization", "Bearer session-token-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;
        let tokens = Arc::new(InMemoryTokenStore::new());
        tokens.store(AccessToken::new("session-token-1").expect("token should be valid"));
        let gateway = gateway_for(&server, tokens).await;

        let valid = gateway
            .validate_session()
            .await
            .expect("validation should succeed");

        assert!(valid);
    }

    #[tokio::test]
    async fn validate_without_a_stored_token_sends_no_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/validate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
            .mount(&server)
            .await;
        let gateway = gateway_for(&server, Arc::new(InMemoryTokenStore::new())).await;

        let valid = gateway
            .validate_session()
            .await
            .expect("validation should complete");

        assert!(!valid);
        let requests = server
            .received_requests()
            .await
            .expect("requests should be recorded");
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn expired_sessions_map_to_authentication_required() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/validate"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "token expired"})),
            )
            .mount(&server)
            .await;
        let tokens = Arc::new(InMemoryTokenStore::new());
        tokens.store(AccessToken::new("stale").expect("token should be valid"));
        let gateway = gateway_for(&server, tokens).await;

        let error = gateway
            .validate_session()
            .await
            .expect_err("expired session should error");

        assert_eq!(error, ApiError::AuthenticationRequired);
    }
}
