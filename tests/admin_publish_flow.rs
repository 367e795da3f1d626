//! Admin login, session validation, and project publishing end to end.

use std::sync::Arc;

use serde_json::json;
use vitrine::admin::{AdminSession, ProjectDraft, ProjectPublisher};
use vitrine::api::{
    ApiBaseUrl, ApiError, Credentials, HttpAuthGateway, HttpProjectGateway, HttpUploadGateway,
    ImageUpload, InMemoryTokenStore, TokenStore,
};
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials {
        email: "admin@example.com".to_owned(),
        password: "hunter2".to_owned(),
    }
}

fn base_for(server: &MockServer) -> ApiBaseUrl {
    ApiBaseUrl::parse(&server.uri()).expect("mock server URI should parse")
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "email": "admin@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": token,
            "message": "Welcome back"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_then_validate_shares_the_stored_token() {
    let server = MockServer::start().await;
    mount_login(&server, "tok-1").await;
    Mock::given(method("POST"))
        .and(path("/api/auth/validate"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;
    let tokens: Arc<dyn TokenStore> = Arc::new(InMemoryTokenStore::new());
    let gateway =
        HttpAuthGateway::new(base_for(&server), Arc::clone(&tokens)).expect("gateway builds");
    let session = AdminSession::new(Arc::new(gateway), Arc::clone(&tokens));

    session
        .login(&credentials())
        .await
        .expect("login should succeed");

    assert!(session.is_authenticated());
    assert!(session.validate().await.expect("validation should succeed"));

    session.logout();
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn rejected_login_surfaces_the_server_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Invalid credentials"
        })))
        .mount(&server)
        .await;
    let tokens: Arc<dyn TokenStore> = Arc::new(InMemoryTokenStore::new());
    let gateway =
        HttpAuthGateway::new(base_for(&server), Arc::clone(&tokens)).expect("gateway builds");
    let session = AdminSession::new(Arc::new(gateway), Arc::clone(&tokens));

    let error = session
        .login(&credentials())
        .await
        .expect_err("rejected login should fail");

    assert_eq!(
        error,
        ApiError::Rejected {
            message: "Invalid credentials".to_owned()
        }
    );
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn an_expired_session_is_cleared_when_validation_errors() {
    let server = MockServer::start().await;
    mount_login(&server, "tok-1").await;
    Mock::given(method("POST"))
        .and(path("/api/auth/validate"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})),
        )
        .mount(&server)
        .await;
    let tokens: Arc<dyn TokenStore> = Arc::new(InMemoryTokenStore::new());
    let gateway =
        HttpAuthGateway::new(base_for(&server), Arc::clone(&tokens)).expect("gateway builds");
    let session = AdminSession::new(Arc::new(gateway), Arc::clone(&tokens));
    session
        .login(&credentials())
        .await
        .expect("login should succeed");

    let error = session
        .validate()
        .await
        .expect_err("validation should surface the 401");

    assert!(
        matches!(error, ApiError::AuthenticationRequired),
        "expected AuthenticationRequired, got {error:?}"
    );
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn publishing_uploads_the_image_then_creates_the_project() {
    let server = MockServer::start().await;
    mount_login(&server, "tok-1").await;
    Mock::given(method("POST"))
        .and(path("/api/upload/image"))
        .and(header("authorization", "Bearer tok-1"))
        .and(body_string_contains("name=\"image\""))
        .and(body_string_contains("filename=\"golden-hour.webp\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"imageUrl": "https://cdn.example.com/uploads/golden-hour.webp"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/projects"))
        .and(header("authorization", "Bearer tok-1"))
        .and(body_json(json!({
            "title": "Golden Hour",
            "imageUrl": "https://cdn.example.com/uploads/golden-hour.webp",
            "category": "Ongoing"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "Project created"
        })))
        .mount(&server)
        .await;
    let tokens: Arc<dyn TokenStore> = Arc::new(InMemoryTokenStore::new());
    let auth =
        HttpAuthGateway::new(base_for(&server), Arc::clone(&tokens)).expect("gateway builds");
    let session = AdminSession::new(Arc::new(auth), Arc::clone(&tokens));
    session
        .login(&credentials())
        .await
        .expect("login should succeed");
    let uploads = HttpUploadGateway::new(base_for(&server), Arc::clone(&tokens))
        .expect("gateway builds");
    let projects = HttpProjectGateway::new(base_for(&server), Arc::clone(&tokens))
        .expect("gateway builds");
    let publisher = ProjectPublisher::new(&uploads, &projects);
    let draft = ProjectDraft {
        title: "Golden Hour".to_owned(),
        category: "   ".to_owned(),
        image: ImageUpload {
            file_name: "golden-hour.webp".to_owned(),
            bytes: b"fake webp bytes".to_vec(),
        },
    };

    publisher
        .publish(&draft)
        .await
        .expect("publishing should succeed");

    let requests = server
        .received_requests()
        .await
        .expect("requests should be recorded");
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn publishing_without_a_session_never_reaches_the_server() {
    let server = MockServer::start().await;
    let tokens: Arc<dyn TokenStore> = Arc::new(InMemoryTokenStore::new());
    let uploads = HttpUploadGateway::new(base_for(&server), Arc::clone(&tokens))
        .expect("gateway builds");
    let projects = HttpProjectGateway::new(base_for(&server), Arc::clone(&tokens))
        .expect("gateway builds");
    let publisher = ProjectPublisher::new(&uploads, &projects);
    let draft = ProjectDraft {
        title: "Golden Hour".to_owned(),
        category: "Ongoing".to_owned(),
        image: ImageUpload {
            file_name: "golden-hour.webp".to_owned(),
            bytes: b"fake webp bytes".to_vec(),
        },
    };

    let error = publisher
        .publish(&draft)
        .await
        .expect_err("a tokenless upload should fail fast");

    assert!(
        matches!(error, ApiError::MissingToken),
        "expected MissingToken, got {error:?}"
    );
    let requests = server
        .received_requests()
        .await
        .expect("requests should be recorded");
    assert!(requests.is_empty());
}
