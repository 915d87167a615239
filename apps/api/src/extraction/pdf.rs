use std::panic;

/// Extracts the text of every page of an in-memory PDF.
///
/// `pdf-extract` panics on some malformed documents; those panics become errors.
pub(super) fn extract(content: &[u8]) -> Result<String, String> {
    panic::catch_unwind(|| pdf_extract::extract_text_from_mem(content))
        .map_err(|_| "PDF parser panicked on malformed input".to_string())?
        .map_err(|e| e.to_string())
}
