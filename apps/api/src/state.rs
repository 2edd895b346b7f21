use std::sync::Arc;

use crate::extraction::SkillExtractor;
use crate::storage::ResumeStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. Both collaborators are trait objects so tests can swap in
/// fakes; no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResumeStore>,
    pub extractor: Arc<dyn SkillExtractor>,
}
