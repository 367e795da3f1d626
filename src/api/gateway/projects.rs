//! Portfolio project listing and creation over the site's REST API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::api::endpoint::ApiBaseUrl;
use crate::api::error::ApiError;
use crate::api::models::{ApiAcknowledgement, ApiProjectListing, NewProject, Project};
use crate::api::token::TokenStore;

use super::ProjectGateway;
use super::client::build_http_client;
use super::http_utils::{ensure_acknowledged, execute_json, with_bearer};

/// Route for listing and creating projects.
const PROJECTS_PATH: &str = "/api/projects";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectBody<'a> {
    title: &'a str,
    image_url: &'a str,
    category: &'a str,
}

/// HTTP-backed project gateway.
///
/// Listing is public; creation carries the stored admin token.
#[derive(Clone)]
pub struct HttpProjectGateway {
    client: Client,
    base: ApiBaseUrl,
    tokens: Arc<dyn TokenStore>,
}

impl HttpProjectGateway {
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
impl ProjectGateway for HttpProjectGateway {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let url = self.base.endpoint(PROJECTS_PATH)?;
        let listing: ApiProjectListing =
            execute_json("list projects", self.client.get(url)).await?;
        Ok(listing.data.into_iter().map(Into::into).collect())
    }

    async fn create_project(&self, draft: &NewProject) -> Result<(), ApiError> {
        let url = self.base.endpoint(PROJECTS_PATH)?;
        let body = CreateProjectBody {
            title: &draft.title,
            image_url: &draft.image_url,
            category: &draft.category,
        };
        let request = with_bearer(self.client.post(url).json(&body), self.tokens.as_ref());
        let ApiAcknowledgement { success, message } =
            execute_json("create project", request).await?;
        ensure_acknowledged(success, message.as_deref(), "failed to create project")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::api::endpoint::AccessToken;
    use crate::api::token::InMemoryTokenStore;

    use super::*;

    async fn gateway_for(
        server: &MockServer,
        tokens: Arc<InMemoryTokenStore>,
    ) -> HttpProjectGateway {
        let base = ApiBaseUrl::parse(&server.uri()).expect("mock server URI should parse");
        HttpProjectGateway::new(base, tokens).expect("gateway should build")
    }

    #[tokio::test]
    async fn list_projects_decodes_partial_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {
                        "id": "proj-1",
                        "title": "Loft conversion",
                        "imageUrl": "https://cdn.example.com/loft.webp",
                        "category": "Complete"
                    },
                    {"title": "Garden office"}
                ]
            })))
            .mount(&server)
            .await;
        let gateway = gateway_for(&server, Arc::new(InMemoryTokenStore::new())).await;

        let projects = gateway
            .list_projects()
            .await
            .expect("listing should decode");

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].category.as_deref(), Some("Complete"));
        assert_eq!(projects[1].id, None);
        assert_eq!(projects[1].title.as_deref(), Some("Garden office"));
    }

    #[tokio::test]
    async fn create_project_sends_the_bearer_token_and_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/projects"))
            .and(header("authorization", "Bearer admin-token"))
            .and(body_json(json!({
                "title": "Loft conversion",
                "imageUrl": "https://cdn.example.com/loft.webp",
                "category": "Ongoing"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;
        let tokens = Arc::new(InMemoryTokenStore::new());
        tokens.store(AccessToken::new("admin-token").expect("token should be valid"));
        let gateway = gateway_for(&server, tokens).await;
        let draft = NewProject {
            title: "Loft conversion".to_owned(),
            image_url: "https://cdn.example.com/loft.webp".to_owned(),
            category: "Ongoing".to_owned(),
        };

        gateway
            .create_project(&draft)
            .await
            .expect("create should succeed");
    }

    #[tokio::test]
    async fn unauthorised_create_maps_to_permission_denied() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/projects"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"error": "admins only"})),
            )
            .mount(&server)
            .await;
        let gateway = gateway_for(&server, Arc::new(InMemoryTokenStore::new())).await;
        let draft = NewProject {
            title: "Loft conversion".to_owned(),
            image_url: "https://cdn.example.com/loft.webp".to_owned(),
            category: "Ongoing".to_owned(),
        };

        let error = gateway
            .create_project(&draft)
            .await
            .expect_err("unauthorised create should fail");

        assert_eq!(error, ApiError::PermissionDenied);
    }
}
