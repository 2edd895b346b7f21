//! Persistence collaborator for users and resume records.
//!
//! Handlers only see `Arc<dyn ResumeStore>`; the production implementation
//! is `PgResumeStore` over sqlx/Postgres, and tests substitute in-memory
//! fakes.

pub mod pg;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::ExtractionOutcome;
use crate::models::resume::{NewResume, ResumeRow, ResumeSummary};
use crate::models::user::User;

pub use pg::PgResumeStore;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Resolves an opaque user identifier. Malformed identifiers resolve to
    /// `None` rather than erroring.
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, AppError>;

    /// Persists a new record with status `processing`, returning its id.
    async fn insert_resume(&self, new: &NewResume) -> Result<Uuid, AppError>;

    /// Fills in extraction results and marks the record `completed`.
    async fn complete_resume(
        &self,
        id: Uuid,
        outcome: &ExtractionOutcome,
    ) -> Result<(), AppError>;

    /// Marks the record `failed`, keeping it for operator inspection.
    async fn fail_resume(&self, id: Uuid, error: &str) -> Result<(), AppError>;

    /// Clears `is_active` on every other record owned by the user.
    async fn deactivate_other_resumes(&self, user_id: Uuid, keep: Uuid) -> Result<(), AppError>;

    /// All records for a user, newest first, without the extracted text.
    async fn list_resumes(&self, user_id: Uuid) -> Result<Vec<ResumeSummary>, AppError>;

    async fn get_resume(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError>;

    /// Returns whether a record existed and was deleted.
    async fn delete_resume(&self, id: Uuid) -> Result<bool, AppError>;
}
