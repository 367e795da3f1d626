//! Data models for the site's REST API.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into the public domain types. They tolerate the fields the
//! backend is known to omit, so a sparse payload still produces a usable
//! domain value rather than a decode failure.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::endpoint::AccessToken;

#[cfg(feature = "test-support")]
pub mod test_support;

/// A published review as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Opaque identifier assigned by the backend.
    pub id: String,
    /// Author display name.
    pub name: String,
    /// Author email address, carried for display only.
    pub email: String,
    /// Star rating between 1 and 5.
    pub rating: u8,
    /// Free-text comment body.
    pub comment: String,
    /// Server-assigned creation timestamp, when provided.
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregate review statistics computed by the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewStatistics {
    /// Mean rating across all reviews, `0.0` when none exist.
    pub average_rating: f64,
    /// Total number of stored reviews.
    pub total_reviews: u64,
}

/// Review list together with its aggregate statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewListing {
    /// Reviews in the server's order, most recent first.
    pub reviews: Vec<Review>,
    /// Aggregate statistics for the full collection.
    pub stats: ReviewStatistics,
}

/// Acknowledgement returned by the review create operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewReceipt {
    /// The stored review as echoed by the backend, when echoed.
    pub review: Option<Review>,
    /// Updated aggregate statistics, when provided.
    pub stats: Option<ReviewStatistics>,
}

/// A review submission candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    /// Author display name.
    pub name: String,
    /// Author email address.
    pub email: String,
    /// Star rating between 1 and 5.
    pub rating: u8,
    /// Free-text comment body.
    pub comment: String,
}

/// Login credentials for the admin panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Admin account email address.
    pub email: String,
    /// Admin account password.
    pub password: String,
}

/// Successful login acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginReceipt {
    /// The session token issued by the backend.
    pub token: AccessToken,
    /// Optional server notice accompanying the login.
    pub message: Option<String>,
}

/// A portfolio project entry.
///
/// The backend treats every field as optional, so listing consumers must
/// cope with partially described projects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    /// Backend identifier, when provided.
    pub id: Option<String>,
    /// Project title.
    pub title: Option<String>,
    /// Hosted image URL.
    pub image_url: Option<String>,
    /// Category label such as "Ongoing".
    pub category: Option<String>,
}

/// Payload for creating a portfolio project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Project title.
    pub title: String,
    /// Hosted image URL obtained from a prior upload.
    pub image_url: String,
    /// Category label.
    pub category: String,
}

/// An image ready for multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name reported to the backend.
    pub file_name: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

/// Acknowledgement returned by the image upload operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// URL where the uploaded image is now hosted.
    pub image_url: String,
}

/// Wire shape of a single review.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiReview {
    pub(super) id: String,
    pub(super) name: String,
    pub(super) email: String,
    pub(super) rating: u8,
    pub(super) comment: String,
    pub(super) created_at: Option<DateTime<Utc>>,
}

/// Wire shape of the aggregate statistics block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiReviewStatistics {
    #[serde(default)]
    pub(super) average_rating: f64,
    #[serde(default)]
    pub(super) total_reviews: u64,
}

/// Wire shape of the review listing envelope.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiReviewListing {
    #[serde(default)]
    pub(super) data: Vec<ApiReview>,
    #[serde(default)]
    pub(super) stats: ApiReviewStatistics,
}

/// Wire shape of the review create acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCreateReviewResponse {
    pub(super) success: Option<bool>,
    pub(super) message: Option<String>,
    pub(super) data: Option<ApiReview>,
    pub(super) stats: Option<ApiReviewStatistics>,
}

/// Wire shape of the standalone statistics lookup.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiStatsResponse {
    #[serde(default)]
    pub(super) stats: ApiReviewStatistics,
}

/// Wire shape of the login acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiLoginResponse {
    pub(super) success: Option<bool>,
    pub(super) token: Option<String>,
    pub(super) message: Option<String>,
}

/// Wire shape of the session validation acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiValidateResponse {
    pub(super) success: Option<bool>,
}

/// Wire shape of a bare `{success, message}` acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiAcknowledgement {
    pub(super) success: Option<bool>,
    pub(super) message: Option<String>,
}

/// Wire shape of a single project entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiProject {
    pub(super) id: Option<String>,
    pub(super) title: Option<String>,
    pub(super) image_url: Option<String>,
    pub(super) category: Option<String>,
}

/// Wire shape of the project listing envelope.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiProjectListing {
    #[serde(default)]
    pub(super) data: Vec<ApiProject>,
}

/// Wire shape of the upload acknowledgement payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiUploadData {
    pub(super) image_url: Option<String>,
}

/// Wire shape of the upload acknowledgement envelope.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUploadResponse {
    pub(super) success: Option<bool>,
    pub(super) message: Option<String>,
    pub(super) data: Option<ApiUploadData>,
}

impl From<ApiReview> for Review {
    fn from(api: ApiReview) -> Self {
        Self {
            id: api.id,
            name: api.name,
            email: api.email,
            rating: api.rating,
            comment: api.comment,
            created_at: api.created_at,
        }
    }
}

impl From<ApiReviewStatistics> for ReviewStatistics {
    fn from(api: ApiReviewStatistics) -> Self {
        Self {
            average_rating: api.average_rating,
            total_reviews: api.total_reviews,
        }
    }
}

impl From<ApiReviewListing> for ReviewListing {
    fn from(api: ApiReviewListing) -> Self {
        Self {
            reviews: api.data.into_iter().map(Into::into).collect(),
            stats: api.stats.into(),
        }
    }
}

impl From<ApiProject> for Project {
    fn from(api: ApiProject) -> Self {
        Self {
            id: api.id,
            title: api.title,
            image_url: api.image_url,
            category: api.category,
        }
    }
}
