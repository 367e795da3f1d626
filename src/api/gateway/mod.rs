//! Gateways for talking to the site's REST API.
//!
//! Each concern is a trait so the store and admin façades stay testable;
//! the `Http*` implementations speak real HTTP through a shared reqwest
//! client and a shared response decoding pipeline.

mod auth;
mod client;
mod error_mapping;
mod http_utils;
mod projects;
mod reviews;
mod upload;

pub use auth::HttpAuthGateway;
pub use projects::HttpProjectGateway;
pub use reviews::HttpReviewGateway;
pub use upload::HttpUploadGateway;

use async_trait::async_trait;

use crate::api::error::ApiError;
use crate::api::models::{
    Credentials, ImageUpload, LoginReceipt, NewProject, NewReview, Project, ReviewListing,
    ReviewReceipt, ReviewStatistics, UploadedImage,
};

/// Gateway for the public review operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewGateway: Send + Sync {
    /// Fetches the full review listing with its aggregate statistics.
    async fn list_reviews(&self) -> Result<ReviewListing, ApiError>;

    /// Submits a new review.
    async fn create_review(&self, candidate: &NewReview) -> Result<ReviewReceipt, ApiError>;

    /// Fetches aggregate statistics without the review list.
    async fn review_statistics(&self) -> Result<ReviewStatistics, ApiError>;
}

/// Gateway for admin authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a session token.
    async fn login(&self, credentials: &Credentials) -> Result<LoginReceipt, ApiError>;

    /// Asks the server whether the stored session token is still honoured.
    async fn validate_session(&self) -> Result<bool, ApiError>;
}

/// Gateway for portfolio project management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectGateway: Send + Sync {
    /// Fetches all projects.
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    /// Creates a project from an already uploaded image.
    async fn create_project(&self, draft: &NewProject) -> Result<(), ApiError>;
}

/// Gateway for image uploads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploadGateway: Send + Sync {
    /// Uploads an image and returns its hosted URL.
    async fn upload_image(&self, upload: &ImageUpload) -> Result<UploadedImage, ApiError>;
}
