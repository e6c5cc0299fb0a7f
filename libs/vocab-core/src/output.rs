//! Atomic package writes.

use crate::error::{PipelineError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Write `bytes` to `path` through a temp file in the same directory.
///
/// The target either receives the whole package or is left untouched.
pub async fn write_package(path: &Path, bytes: Vec<u8>) -> Result<()> {
    let target = path.to_path_buf();
    let written = tokio::task::spawn_blocking(move || persist(&target, &bytes)).await;

    match written {
        Ok(result) => result.map_err(|source| write_error(path, source)),
        Err(e) => Err(write_error(
            path,
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        )),
    }
}

fn persist(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(bytes)?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn write_error(path: &Path, source: std::io::Error) -> PipelineError {
    PipelineError::Write {
        path: PathBuf::from(path),
        source,
    }
}
