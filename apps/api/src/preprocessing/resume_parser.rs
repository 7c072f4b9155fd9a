//! Résumé text extraction from an uploaded PDF.
//!
//! `pdf_extract` is synchronous and CPU-bound; callers in async context run this
//! inside `tokio::task::spawn_blocking`.

use tracing::debug;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Extracts plain text from PDF bytes, one non-blank trimmed line per output line.
///
/// An image-only PDF yields an empty string; deciding whether that is an error is left
/// to the caller.
pub fn extract_resume_text(bytes: &[u8]) -> Result<String, AppError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::Validation(
            "The uploaded resume must be a PDF file".to_string(),
        ));
    }

    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(e.to_string()))?;

    let text = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    debug!(bytes = bytes.len(), chars = text.len(), "Extracted resume text");
    Ok(text)
}
