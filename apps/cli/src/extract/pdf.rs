//! PDF text extraction via the pdf-extract crate.

use vocab_core::ExtractionError;

/// Extract the full text of a PDF held in memory.
///
/// Encrypted, scanned-only and corrupted files surface as `ExtractionError::Pdf`.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_an_error() {
        let result = extract_pdf(b"definitely not a pdf");
        assert!(matches!(result, Err(ExtractionError::Pdf(_))));
    }
}
