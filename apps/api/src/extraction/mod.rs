//! Text extraction — uploaded resume bytes to plain text.
//!
//! Dispatches on file extension. No OCR and no layout preservation: the output
//! is whatever plain text the underlying parser yields.

mod docx;
mod pdf;

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format '{0}'. Please upload a PDF or DOCX file.")]
    UnsupportedFormat(String),

    #[error("Error reading {format} file: {cause}")]
    Failure { format: &'static str, cause: String },
}

/// Supported resume formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

impl ResumeFormat {
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Ok(ResumeFormat::Pdf)
        } else if lower.ends_with(".docx") {
            Ok(ResumeFormat::Docx)
        } else {
            let ext = lower.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
            Err(ExtractionError::UnsupportedFormat(ext.to_string()))
        }
    }

    fn label(self) -> &'static str {
        match self {
            ResumeFormat::Pdf => "PDF",
            ResumeFormat::Docx => "DOCX",
        }
    }
}

/// Extracts plain text from a resume file. Synchronous and CPU-bound.
pub fn extract_text(filename: &str, content: &[u8]) -> Result<String, ExtractionError> {
    let format = ResumeFormat::from_filename(filename)?;
    let result = match format {
        ResumeFormat::Pdf => pdf::extract(content),
        ResumeFormat::Docx => docx::extract(content),
    };

    match result {
        Ok(text) => {
            debug!("Extracted {} chars from {filename}", text.len());
            Ok(text)
        }
        Err(cause) => {
            warn!("Failed to extract text from {filename}: {cause}");
            Err(ExtractionError::Failure {
                format: format.label(),
                cause,
            })
        }
    }
}

/// Runs [`extract_text`] on the blocking pool. A panicking parser is reported
/// as an extraction failure.
pub async fn extract_text_blocking(
    filename: String,
    content: Vec<u8>,
) -> Result<String, ExtractionError> {
    let label = ResumeFormat::from_filename(&filename)?.label();
    tokio::task::spawn_blocking(move || extract_text(&filename, &content))
        .await
        .map_err(|e| ExtractionError::Failure {
            format: label,
            cause: format!("parser aborted: {e}"),
        })?
}
