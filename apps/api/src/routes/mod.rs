pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::config::MAX_RESUME_BYTES;
use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/resume/upload", post(handlers::handle_upload))
        .route(
            "/api/resume/my-resumes",
            get(handlers::handle_list_resumes),
        )
        .route(
            "/api/resume/:id",
            get(handlers::handle_get_resume).delete(handlers::handle_delete_resume),
        )
        // Transport limit sits above the 5 MB cap so the handler's own size
        // check produces the documented error.
        .layer(DefaultBodyLimit::max(MAX_RESUME_BYTES * 2))
        .with_state(state)
}
