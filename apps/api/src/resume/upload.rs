//! Resume intake pipeline: validate → persist (processing) → extract →
//! complete or fail.

use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::MAX_RESUME_BYTES;
use crate::errors::AppError;
use crate::extraction::DocumentKind;
use crate::models::resume::NewResume;
use crate::state::AppState;

/// The binary part of the multipart request, as parsed by the handler.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub resume_id: Uuid,
    pub file_name: String,
    pub file_size: i64,
    pub extracted_skills: Vec<String>,
    pub skills_count: usize,
    pub extracted_education: Option<String>,
    pub experience_years: i32,
    pub confidence: f64,
    pub status: String,
}

/// Processes one upload. Validation order is part of the endpoint contract:
/// file presence, then type, then size, then user — first failure wins.
///
/// The record is persisted before extraction runs; if extraction fails the
/// record is kept with status `failed` and the caller gets its id back.
/// Repeated uploads always create new records; older ones are deactivated,
/// never replaced.
pub async fn process_upload(
    state: &AppState,
    file: Option<FilePart>,
    user_id: Option<String>,
) -> Result<UploadResponse, AppError> {
    let file = file.ok_or(AppError::MissingFile)?;
    if file.file_name.is_empty() {
        return Err(AppError::MissingFile);
    }

    let kind = DocumentKind::detect(&file.file_name, file.content_type.as_deref())
        .ok_or_else(|| AppError::UnsupportedFileType(extension_of(&file.file_name)))?;

    if file.bytes.len() > MAX_RESUME_BYTES {
        return Err(AppError::FileTooLarge);
    }

    let user_id = user_id.ok_or(AppError::UserNotFound)?;
    let user = state
        .store
        .find_user(user_id.trim())
        .await?
        .ok_or(AppError::UserNotFound)?;

    let new = NewResume {
        user_id: user.id,
        file_name: sanitize_filename(&file.file_name),
        file_size: file.bytes.len() as i64,
        file_type: kind.mime().to_string(),
    };
    let resume_id = state.store.insert_resume(&new).await?;

    match state.extractor.extract(&file.bytes, kind).await {
        Ok(outcome) => {
            state.store.complete_resume(resume_id, &outcome).await?;
            state
                .store
                .deactivate_other_resumes(user.id, resume_id)
                .await?;
            info!(
                %resume_id,
                user_id = %user.id,
                skills = outcome.skills.len(),
                confidence = outcome.confidence,
                "resume processed"
            );
            Ok(UploadResponse {
                message: "Resume uploaded and processed successfully".to_string(),
                resume_id,
                file_name: new.file_name,
                file_size: new.file_size,
                skills_count: outcome.skills.len(),
                extracted_skills: outcome.skills,
                extracted_education: outcome.education,
                experience_years: outcome.experience_years,
                confidence: outcome.confidence,
                status: "completed".to_string(),
            })
        }
        Err(e) => {
            let message = e.to_string();
            if let Err(store_err) = state.store.fail_resume(resume_id, &message).await {
                tracing::error!("could not mark resume {resume_id} as failed: {store_err}");
            }
            Err(AppError::ProcessingFailed { resume_id, message })
        }
    }
}

fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Keeps alphanumerics, dots, dashes, and underscores; everything else
/// (path separators included) becomes an underscore.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::fakes::{FailingExtractor, FixedExtractor, MemoryStore};
    use crate::storage::ResumeStore;

    fn pdf_part(size: usize) -> FilePart {
        FilePart {
            file_name: "alice_resume.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            bytes: Bytes::from(vec![b'x'; size]),
        }
    }

    fn state_with_user(user_id: Uuid) -> AppState {
        AppState {
            store: Arc::new(MemoryStore::with_user(user_id)),
            extractor: Arc::new(FixedExtractor::with_skills(&["Python", "React"], 72.5)),
        }
    }

    #[tokio::test]
    async fn valid_upload_returns_skills_and_persists_record() {
        let user_id = Uuid::new_v4();
        let store = Arc::new(MemoryStore::with_user(user_id));
        let state = AppState {
            store: store.clone(),
            extractor: Arc::new(FixedExtractor::with_skills(&["Python", "React"], 72.5)),
        };

        let response = process_upload(&state, Some(pdf_part(128)), Some(user_id.to_string()))
            .await
            .expect("upload succeeds");

        assert_eq!(response.message, "Resume uploaded and processed successfully");
        assert_eq!(response.extracted_skills, vec!["Python", "React"]);
        assert_eq!(response.skills_count, 2);
        assert!(response.confidence > 0.0 && response.confidence <= 100.0);
        assert_eq!(response.status, "completed");

        let stored = store
            .get_resume(response.resume_id)
            .await
            .unwrap()
            .expect("record persisted");
        assert_eq!(stored.parsing_status, "completed");
        assert_eq!(stored.user_id, user_id);
        assert_eq!(stored.file_size, 128);
        assert!(stored.is_active);
    }

    #[tokio::test]
    async fn missing_file_is_rejected_first() {
        let state = state_with_user(Uuid::new_v4());
        // even with a bogus user id, the absent file wins
        let err = process_upload(&state, None, Some("nope".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingFile));
    }

    #[tokio::test]
    async fn empty_filename_counts_as_no_file() {
        let state = state_with_user(Uuid::new_v4());
        let part = FilePart {
            file_name: String::new(),
            content_type: None,
            bytes: Bytes::from_static(b"data"),
        };
        let err = process_upload(&state, Some(part), None).await.unwrap_err();
        assert!(matches!(err, AppError::MissingFile));
    }

    #[tokio::test]
    async fn unsupported_extension_is_rejected_before_user_lookup() {
        let state = state_with_user(Uuid::new_v4());
        let part = FilePart {
            file_name: "resume.txt".to_string(),
            content_type: Some("text/plain".to_string()),
            bytes: Bytes::from_static(b"plain text"),
        };
        let err = process_upload(&state, Some(part), Some("not-a-user".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFileType(ext) if ext == "txt"));
    }

    #[tokio::test]
    async fn oversize_file_is_rejected() {
        let user_id = Uuid::new_v4();
        let state = state_with_user(user_id);
        let err = process_upload(
            &state,
            Some(pdf_part(MAX_RESUME_BYTES + 1)),
            Some(user_id.to_string()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::FileTooLarge));
    }

    #[tokio::test]
    async fn unknown_user_is_rejected() {
        let state = state_with_user(Uuid::new_v4());
        let err = process_upload(
            &state,
            Some(pdf_part(64)),
            Some(Uuid::new_v4().to_string()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }

    #[tokio::test]
    async fn malformed_or_missing_user_id_is_rejected() {
        let state = state_with_user(Uuid::new_v4());
        let err = process_upload(&state, Some(pdf_part(64)), Some("zzz".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));

        let err = process_upload(&state, Some(pdf_part(64)), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }

    #[tokio::test]
    async fn repeated_uploads_create_distinct_records_and_deactivate_older() {
        let user_id = Uuid::new_v4();
        let store = Arc::new(MemoryStore::with_user(user_id));
        let state = AppState {
            store: store.clone(),
            extractor: Arc::new(FixedExtractor::with_skills(&["Go"], 40.0)),
        };

        let first = process_upload(&state, Some(pdf_part(64)), Some(user_id.to_string()))
            .await
            .unwrap();
        let second = process_upload(&state, Some(pdf_part(64)), Some(user_id.to_string()))
            .await
            .unwrap();

        assert_ne!(first.resume_id, second.resume_id);

        let older = store.get_resume(first.resume_id).await.unwrap().unwrap();
        let newer = store.get_resume(second.resume_id).await.unwrap().unwrap();
        assert!(!older.is_active);
        assert!(newer.is_active);
    }

    #[tokio::test]
    async fn extraction_failure_keeps_failed_record_and_reports_its_id() {
        let user_id = Uuid::new_v4();
        let store = Arc::new(MemoryStore::with_user(user_id));
        let state = AppState {
            store: store.clone(),
            extractor: Arc::new(FailingExtractor),
        };

        let err = process_upload(&state, Some(pdf_part(64)), Some(user_id.to_string()))
            .await
            .unwrap_err();

        let AppError::ProcessingFailed { resume_id, message } = err else {
            panic!("expected ProcessingFailed");
        };
        assert!(message.contains("document is corrupted"));

        let stored = store.get_resume(resume_id).await.unwrap().unwrap();
        assert_eq!(stored.parsing_status, "failed");
        assert!(stored.parsing_error.unwrap().contains("document is corrupted"));
    }

    #[test]
    fn sanitize_filename_strips_path_and_shell_characters() {
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("my resume (final).pdf"), "my_resume__final_.pdf");
        assert_eq!(sanitize_filename("alice-cv_v2.docx"), "alice-cv_v2.docx");
    }
}
