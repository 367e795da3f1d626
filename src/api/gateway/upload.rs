//! Multipart image upload over the site's REST API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};

use crate::api::endpoint::ApiBaseUrl;
use crate::api::error::ApiError;
use crate::api::models::{ApiUploadResponse, ImageUpload, UploadedImage};
use crate::api::token::TokenStore;

use super::UploadGateway;
use super::client::build_http_client;
use super::http_utils::{ensure_acknowledged, execute_json, with_bearer};

/// Route for uploading project images.
const UPLOAD_IMAGE_PATH: &str = "/api/upload/image";
/// Multipart field name the backend reads the image from.
const IMAGE_FIELD: &str = "image";

/// HTTP-backed upload gateway.
///
/// Uploads are admin-only, so a missing token fails before any bytes are
/// sent.
#[derive(Clone)]
pub struct HttpUploadGateway {
    client: Client,
    base: ApiBaseUrl,
    tokens: Arc<dyn TokenStore>,
}

impl HttpUploadGateway {
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
impl UploadGateway for HttpUploadGateway {
    async fn upload_image(&self, upload: &ImageUpload) -> Result<UploadedImage, ApiError> {
        if self.tokens.current().is_none() {
            return Err(ApiError::MissingToken);
        }

        let url = self.base.endpoint(UPLOAD_IMAGE_PATH)?;
        let part = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
        let form = Form::new().part(IMAGE_FIELD, part);
        let request = with_bearer(self.client.post(url).multipart(form), self.tokens.as_ref());
        let ApiUploadResponse {
            success,
            message,
            data,
        } = execute_json("upload image", request).await?;
        ensure_acknowledged(success, message.as_deref(), "image upload failed")?;
        let image_url = data
            .and_then(|payload| payload.image_url)
            .ok_or_else(|| ApiError::Protocol {
                message: "upload acknowledgement did not include an image URL".to_owned(),
            })?;
        Ok(UploadedImage { image_url })
    }
}
