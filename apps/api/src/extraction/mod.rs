//! Skill extraction — pluggable, trait-based collaborator that turns resume
//! bytes into skill labels and a confidence score.
//!
//! Default: `KeywordSkillExtractor` (pure-Rust, deterministic, fully
//! testable). `AppState` holds an `Arc<dyn SkillExtractor>` so handlers can
//! be exercised against fakes.

pub mod keyword;
pub mod text;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub use keyword::KeywordSkillExtractor;

/// Accepted resume document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
}

impl DocumentKind {
    /// Classifies an upload by filename extension, falling back to the
    /// declared content type. Returns `None` for anything outside
    /// {PDF, DOC, DOCX}.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Option<Self> {
        if let Some((_, ext)) = file_name.rsplit_once('.') {
            match ext.to_ascii_lowercase().as_str() {
                "pdf" => return Some(Self::Pdf),
                "doc" => return Some(Self::Doc),
                "docx" => return Some(Self::Docx),
                _ => return None,
            }
        }
        match content_type {
            Some("application/pdf") => Some(Self::Pdf),
            Some("application/msword") => Some(Self::Doc),
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document") => {
                Some(Self::Docx)
            }
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Doc => "application/msword",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Everything the extractor derives from one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    /// Full text recovered from the document.
    pub text: String,
    /// Ordered, de-duplicated skill labels.
    pub skills: Vec<String>,
    /// Confidence in the extraction, 0–100.
    pub confidence: f64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education: Option<String>,
    pub experience_years: i32,
}

/// The extraction collaborator. Implement this to swap backends without
/// touching the upload handler.
#[async_trait]
pub trait SkillExtractor: Send + Sync {
    async fn extract(&self, bytes: &[u8], kind: DocumentKind)
        -> Result<ExtractionOutcome, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_prefers_extension() {
        assert_eq!(
            DocumentKind::detect("resume.PDF", Some("text/plain")),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(DocumentKind::detect("cv.docx", None), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::detect("old.doc", None), Some(DocumentKind::Doc));
    }

    #[test]
    fn detect_rejects_unsupported() {
        assert_eq!(DocumentKind::detect("notes.txt", Some("text/plain")), None);
        assert_eq!(DocumentKind::detect("payload.exe", None), None);
        // a recognized extension is not overridden by the content type
        assert_eq!(DocumentKind::detect("script.js", Some("application/pdf")), None);
    }

    #[test]
    fn detect_falls_back_to_content_type() {
        assert_eq!(
            DocumentKind::detect("resume", Some("application/pdf")),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(DocumentKind::detect("resume", None), None);
    }
}
