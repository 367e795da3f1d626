//! Typed surface of the site's REST API.
//!
//! This module validates the configured base URL, carries the admin bearer
//! token, deserialises wire payloads into domain types, and maps every
//! failure onto [`ApiError`] so callers never see transport internals.

pub mod endpoint;
pub mod error;
pub mod gateway;
pub mod models;
pub mod token;

pub use endpoint::{AccessToken, ApiBaseUrl};
pub use error::ApiError;
pub use gateway::{
    AuthGateway, HttpAuthGateway, HttpProjectGateway, HttpReviewGateway, HttpUploadGateway,
    ProjectGateway, ReviewGateway, UploadGateway,
};
pub use models::{
    Credentials, ImageUpload, LoginReceipt, NewProject, NewReview, Project, Review, ReviewListing,
    ReviewReceipt, ReviewStatistics, UploadedImage,
};
pub use token::{InMemoryTokenStore, TokenStore};

#[cfg(test)]
pub use gateway::{MockAuthGateway, MockProjectGateway, MockReviewGateway, MockUploadGateway};
