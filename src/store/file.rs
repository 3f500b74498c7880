//! Local fallback credential file
//!
//! Holds the identical schema to the remote store value. Reads are bounded
//! by the same per-call timeout as store requests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::FileError;

/// Reader for the configured local fallback file
pub struct FileSource {
    path: PathBuf,
    timeout: Duration,
}

impl FileSource {
    pub fn new(path: PathBuf, timeout: Duration) -> Self {
        Self { path, timeout }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file, bounded by the configured timeout
    pub async fn read(&self) -> Result<Vec<u8>, FileError> {
        match tokio::time::timeout(self.timeout, tokio::fs::read(&self.path)).await {
            Ok(Ok(bytes)) => Ok(bytes),
            Ok(Err(e)) => Err(FileError::Io {
                path: self.path.display().to_string(),
                detail: e.to_string(),
            }),
            Err(_) => Err(FileError::Timeout {
                path: self.path.display().to_string(),
            }),
        }
    }
}
