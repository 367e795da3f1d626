//! Project publishing: image upload followed by project creation.

use crate::api::error::ApiError;
use crate::api::gateway::{ProjectGateway, UploadGateway};
use crate::api::models::{ImageUpload, NewProject};

/// Category assigned when a draft leaves it blank.
const DEFAULT_CATEGORY: &str = "Ongoing";

/// A portfolio project ready to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    /// Project title.
    pub title: String,
    /// Category label; a blank value falls back to "Ongoing".
    pub category: String,
    /// Image to upload for the project card.
    pub image: ImageUpload,
}

/// Publishes portfolio projects through the upload and project gateways.
pub struct ProjectPublisher<'gateways, Uploads, Projects>
where
    Uploads: UploadGateway,
    Projects: ProjectGateway,
{
    uploads: &'gateways Uploads,
    projects: &'gateways Projects,
}

impl<'gateways, Uploads, Projects> ProjectPublisher<'gateways, Uploads, Projects>
where
    Uploads: UploadGateway,
    Projects: ProjectGateway,
{
    /// Creates a publisher over the two gateways.
    #[must_use]
    pub const fn new(uploads: &'gateways Uploads, projects: &'gateways Projects) -> Self {
        Self { uploads, projects }
    }

    /// Uploads the draft's image, then creates the project with the hosted
    /// URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingField`] for a blank title before any
    /// network activity, [`ApiError::MissingToken`] when no admin token is
    /// stored, and otherwise the first failing step's error. Nothing is
    /// retried; a create failure leaves the uploaded image unreferenced.
    pub async fn publish(&self, draft: &ProjectDraft) -> Result<(), ApiError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(ApiError::MissingField {
                field: "title".to_owned(),
            });
        }

        let uploaded = self.uploads.upload_image(&draft.image).await?;
        let project = NewProject {
            title: title.to_owned(),
            image_url: uploaded.image_url,
            category: normalise_category(&draft.category),
        };
        self.projects.create_project(&project).await
    }
}

fn normalise_category(category: &str) -> String {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        DEFAULT_CATEGORY.to_owned()
    } else {
        trimmed.to_owned()
    }
}
