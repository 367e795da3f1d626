//! Vitrine library crate: the client-side engine for a portfolio site's
//! REST backend.
//!
//! The library keeps a polling, optimistically updated local view of the
//! site's visitor reviews and wraps the admin flows (login, session
//! validation, image upload, and project creation) behind typed gateways,
//! so any user interface can sit on top without touching HTTP directly.

pub mod admin;
pub mod api;
pub mod config;
pub mod reviews;
pub mod telemetry;

pub use admin::{AdminSession, ProjectDraft, ProjectPublisher};
pub use api::{
    AccessToken, ApiBaseUrl, ApiError, AuthGateway, Credentials, HttpAuthGateway,
    HttpProjectGateway, HttpReviewGateway, HttpUploadGateway, ImageUpload, InMemoryTokenStore,
    NewProject, NewReview, Project, ProjectGateway, Review, ReviewGateway, ReviewListing,
    ReviewStatistics, TokenStore, UploadGateway, UploadedImage,
};
pub use config::SiteConfig;
pub use reviews::{
    ObserverId, ReviewEvent, ReviewObserver, ReviewStore, ReviewsSnapshot,
};
pub use telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink};
