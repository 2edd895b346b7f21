use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeRow, ResumeSummary};
use crate::resume::upload::{process_upload, FilePart, UploadResponse};
use crate::state::AppState;

/// POST /api/resume/upload
///
/// Multipart form with a binary `resume` part and a text `user_id` part.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut file: Option<FilePart> = None;
    let mut user_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        match field.name() {
            Some("resume") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                file = Some(FilePart {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            Some("user_id") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read user_id: {e}")))?;
                user_id = Some(value);
            }
            _ => {} // unknown parts are ignored
        }
    }

    let response = process_upload(&state, file, user_id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: String,
}

#[derive(Serialize)]
pub struct ResumeListResponse {
    pub resumes: Vec<ResumeSummary>,
    pub count: usize,
}

/// GET /api/resume/my-resumes?user_id=<id>
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeListResponse>, AppError> {
    let user = state
        .store
        .find_user(&params.user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;
    let resumes = state.store.list_resumes(user.id).await?;
    Ok(Json(ResumeListResponse {
        count: resumes.len(),
        resumes,
    }))
}

#[derive(Serialize)]
pub struct ResumeResponse {
    pub resume: ResumeRow,
}

/// GET /api/resume/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeResponse>, AppError> {
    let resume = state
        .store
        .get_resume(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;
    Ok(Json(ResumeResponse { resume }))
}

/// DELETE /api/resume/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !state.store.delete_resume(id).await? {
        return Err(AppError::NotFound("Resume not found".to_string()));
    }
    Ok(Json(serde_json::json!({
        "message": "Resume deleted successfully"
    })))
}
