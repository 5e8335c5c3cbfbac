//! Text extraction — turns an uploaded resume into plain text.
//!
//! The accepted formats form a closed set; anything else is rejected up front
//! with `UnsupportedFileType` instead of flowing an empty resume into the prompt.

pub mod docx;
pub mod pdf;

use thiserror::Error;
use tracing::debug;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not read DOCX: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

impl ResumeFormat {
    /// Maps a declared content type onto a supported format.
    /// Parameters such as `; charset=...` are ignored.
    pub fn from_mime(mime: &str) -> Result<Self, ExtractionError> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case(PDF_MIME) {
            Ok(ResumeFormat::Pdf)
        } else if essence.eq_ignore_ascii_case(DOCX_MIME) {
            Ok(ResumeFormat::Docx)
        } else {
            Err(ExtractionError::UnsupportedFileType(mime.to_string()))
        }
    }
}

/// Extracts the plain text of `bytes` interpreted as `format`.
pub fn extract_text(format: ResumeFormat, bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = match format {
        ResumeFormat::Pdf => pdf::extract_pdf_text(bytes)?,
        ResumeFormat::Docx => docx::extract_docx_text(bytes)?,
    };
    debug!(
        "Extracted {} chars from {:?} upload ({} bytes)",
        text.chars().count(),
        format,
        bytes.len()
    );
    Ok(text)
}
