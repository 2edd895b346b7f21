#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One processed upload: file metadata plus extraction results.
///
/// `parsing_status` workflow: processing → completed | failed.
/// Only the newest successful upload per user stays `is_active`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub extracted_text: Option<String>,
    pub extracted_skills: Vec<String>,
    pub extracted_email: Option<String>,
    pub extracted_phone: Option<String>,
    pub extracted_education: Option<String>,
    pub experience_years: i32,
    pub parsing_status: String,
    pub parsing_confidence: f64,
    pub parsing_error: Option<String>,
    pub is_active: bool,
    pub uploaded_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

/// Listing projection — everything except the large `extracted_text` column.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeSummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub extracted_skills: Vec<String>,
    pub extracted_education: Option<String>,
    pub experience_years: i32,
    pub parsing_status: String,
    pub parsing_confidence: f64,
    pub is_active: bool,
    pub uploaded_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

/// Fields known before extraction runs; the rest is filled in by
/// `complete_resume` / `fail_resume`.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub user_id: Uuid,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
}
