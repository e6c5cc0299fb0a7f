//! Document text extraction backends.

pub mod docx;
pub mod pdf;

use std::io::Cursor;
use std::path::{Path, PathBuf};
use vocab_core::{DocumentKind, ExtractionError, Extractor};

/// Reads a file from disk and extracts text according to its kind.
///
/// Parsing runs on the blocking pool; both parsers are CPU-bound.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileExtractor;

impl Extractor for FileExtractor {
    async fn extract(&self, path: &Path, kind: DocumentKind) -> Result<String, ExtractionError> {
        let bytes = tokio::fs::read(path).await?;
        let source: PathBuf = path.to_path_buf();

        let text = tokio::task::spawn_blocking(move || match kind {
            DocumentKind::Pdf => pdf::extract_pdf(&bytes),
            DocumentKind::Docx => docx::extract_docx(Cursor::new(bytes)),
        })
        .await
        .map_err(|e| ExtractionError::Join(e.to_string()))??;

        tracing::info!(
            path = %source.display(),
            chars = text.chars().count(),
            lines = text.lines().count(),
            "text extracted"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileExtractor
            .extract(&dir.path().join("absent.pdf"), DocumentKind::Pdf)
            .await;
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }

    #[tokio::test]
    async fn corrupt_docx_is_docx_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"PK not really").unwrap();

        let result = FileExtractor.extract(&path, DocumentKind::Docx).await;
        assert!(matches!(result, Err(ExtractionError::Docx(_))));
    }
}
