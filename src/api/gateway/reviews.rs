//! Review listing and submission over the site's REST API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::api::endpoint::ApiBaseUrl;
use crate::api::error::ApiError;
use crate::api::models::{
    ApiCreateReviewResponse, ApiReviewListing, ApiStatsResponse, NewReview, ReviewListing,
    ReviewReceipt, ReviewStatistics,
};

use super::ReviewGateway;
use super::client::build_http_client;
use super::http_utils::{ensure_acknowledged, execute_json};

/// Route for listing and creating reviews.
const REVIEWS_PATH: &str = "/api/reviews";
/// Route for the standalone statistics lookup.
const REVIEW_STATS_PATH: &str = "/api/reviews/stats";

#[derive(Debug, Serialize)]
struct CreateReviewBody<'a> {
    name: &'a str,
    email: &'a str,
    rating: u8,
    comment: &'a str,
}

/// HTTP-backed review gateway.
///
/// Review routes are public, so this gateway never attaches a bearer token.
#[derive(Debug, Clone)]
pub struct HttpReviewGateway {
    client: Client,
    base: ApiBaseUrl,
}

impl HttpReviewGateway {
    /// Creates a gateway for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] when the shared HTTP client cannot be
    /// built.
    pub fn new(base: ApiBaseUrl) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_http_client()?,
            base,
        })
    }
}

#[async_trait]
impl ReviewGateway for HttpReviewGateway {
    async fn list_reviews(&self) -> Result<ReviewListing, ApiError> {
        let url = self.base.endpoint(REVIEWS_PATH)?;
        let listing: ApiReviewListing = execute_json("list reviews", self.client.get(url)).await?;
        Ok(listing.into())
    }

    async fn create_review(&self, candidate: &NewReview) -> Result<ReviewReceipt, ApiError> {
        let url = self.base.endpoint(REVIEWS_PATH)?;
        let body = CreateReviewBody {
            name: &candidate.name,
            email: &candidate.email,
            rating: candidate.rating,
            comment: &candidate.comment,
        };
        let ApiCreateReviewResponse {
            success,
            message,
            data,
            stats,
        } = execute_json("create review", self.client.post(url).json(&body)).await?;
        ensure_acknowledged(
            success,
            message.as_deref(),
            "the server did not accept the review",
        )?;
        Ok(ReviewReceipt {
            review: data.map(Into::into),
            stats: stats.map(Into::into),
        })
    }

    async fn review_statistics(&self) -> Result<ReviewStatistics, ApiError> {
        let url = self.base.endpoint(REVIEW_STATS_PATH)?;
        let response: ApiStatsResponse =
            execute_json("review statistics", self.client.get(url)).await?;
        Ok(response.stats.into())
    }
}
