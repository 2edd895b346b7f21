//! PostgreSQL-backed `ResumeStore`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::ExtractionOutcome;
use crate::models::resume::{NewResume, ResumeRow, ResumeSummary};
use crate::models::user::User;
use crate::storage::ResumeStore;

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn find_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        // Opaque ids that don't parse can't reference a stored user.
        let Ok(id) = Uuid::parse_str(user_id) else {
            return Ok(None);
        };
        let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert_resume(&self, new: &NewResume) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO resumes (user_id, file_name, file_size, file_type, parsing_status)
            VALUES ($1, $2, $3, $4, 'processing')
            RETURNING id
            "#,
        )
        .bind(new.user_id)
        .bind(&new.file_name)
        .bind(new.file_size)
        .bind(&new.file_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn complete_resume(
        &self,
        id: Uuid,
        outcome: &ExtractionOutcome,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE resumes
            SET extracted_text = $2,
                extracted_skills = $3,
                extracted_email = $4,
                extracted_phone = $5,
                extracted_education = $6,
                experience_years = $7,
                parsing_status = 'completed',
                parsing_confidence = $8,
                processed_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&outcome.text)
        .bind(&outcome.skills)
        .bind(&outcome.email)
        .bind(&outcome.phone)
        .bind(&outcome.education)
        .bind(outcome.experience_years)
        .bind(outcome.confidence)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn fail_resume(&self, id: Uuid, error: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE resumes
            SET parsing_status = 'failed',
                parsing_error = $2,
                processed_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(error)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn deactivate_other_resumes(&self, user_id: Uuid, keep: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE resumes SET is_active = FALSE WHERE user_id = $1 AND id <> $2")
            .bind(user_id)
            .bind(keep)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_resumes(&self, user_id: Uuid) -> Result<Vec<ResumeSummary>, AppError> {
        let rows: Vec<ResumeSummary> = sqlx::query_as(
            r#"
            SELECT id, user_id, file_name, file_size, file_type, extracted_skills,
                   extracted_education, experience_years, parsing_status,
                   parsing_confidence, is_active, uploaded_at, processed_at
            FROM resumes
            WHERE user_id = $1
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_resume(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        let row: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_resume(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
