//! Admin façades: session management and project publishing.

pub mod publisher;
pub mod session;

pub use publisher::{ProjectDraft, ProjectPublisher};
pub use session::AdminSession;
