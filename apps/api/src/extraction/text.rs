//! Document text recovery for the supported resume formats.

use crate::errors::AppError;
use crate::extraction::DocumentKind;

/// Extracts plain text from an uploaded document.
///
/// PDFs go through `pdf-extract`. Word documents fall back to a printable-run
/// scan over the raw bytes, which recovers the text runs of legacy `.doc`
/// files reasonably well.
// TODO: parse DOCX properly (word/document.xml) via docx-rust instead of the
// printable-run fallback.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, AppError> {
    match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map(|t| t.trim().to_string())
            .map_err(|e| AppError::Extraction(format!("Failed to extract text from PDF: {e}"))),
        DocumentKind::Doc | DocumentKind::Docx => Ok(printable_runs(bytes)),
    }
}

/// Keeps runs of printable characters (length ≥ 4) from arbitrary bytes,
/// joined by single spaces.
fn printable_runs(bytes: &[u8]) -> String {
    let mut runs: Vec<String> = Vec::new();
    let mut current = String::new();

    for chunk in String::from_utf8_lossy(bytes).chars() {
        if chunk.is_ascii_graphic() || chunk == ' ' {
            current.push(chunk);
        } else if !current.is_empty() {
            if current.trim().len() >= 4 {
                runs.push(current.trim().to_string());
            }
            current.clear();
        }
    }
    if current.trim().len() >= 4 {
        runs.push(current.trim().to_string());
    }

    runs.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_runs_recovers_text_between_binary_noise() {
        let mut bytes = vec![0u8, 1, 2];
        bytes.extend_from_slice(b"Experienced Python developer");
        bytes.extend_from_slice(&[0xFF, 0xFE, 0x00]);
        bytes.extend_from_slice(b"React and MongoDB");
        bytes.push(0x07);

        let text = printable_runs(&bytes);
        assert!(text.contains("Experienced Python developer"));
        assert!(text.contains("React and MongoDB"));
    }

    #[test]
    fn printable_runs_drops_short_fragments() {
        let bytes = [b'a', b'b', 0, b'x', b'y', b'z', 0];
        assert_eq!(printable_runs(&bytes), "");
    }
}
