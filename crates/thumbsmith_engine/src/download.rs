//! Saving generated thumbnails to disk.
//!
//! Fetch the image, write a temp file, then rename into place under a
//! timestamped name in the downloads directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::api::map_reqwest_error;
use crate::{ApiError, FailureKind};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("downloads directory missing or not writable: {0}")]
    DownloadDir(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Filename for a saved thumbnail: `thumbnail_{timestamp}.jpg`, with the
/// timestamp in milliseconds since the epoch.
pub fn download_filename(timestamp_millis: u64) -> String {
    format!("thumbnail_{timestamp_millis}.jpg")
}

/// Ensure the downloads directory exists; create if missing.
pub fn ensure_download_dir(dir: &Path) -> Result<(), DownloadError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| DownloadError::DownloadDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(DownloadError::DownloadDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| DownloadError::DownloadDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| DownloadError::DownloadDir(e.to_string()))?;
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file
/// then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, DownloadError> {
        ensure_download_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace an existing file if present to keep determinism.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target)
            .map_err(|e| DownloadError::Io(e.error))?;
        Ok(target)
    }
}

/// Fetches an image reference and saves it under the downloads directory.
pub struct ImageDownloader {
    dir: PathBuf,
}

impl ImageDownloader {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub async fn download(
        &self,
        url: &str,
        timestamp_millis: u64,
    ) -> Result<PathBuf, DownloadError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        let response = client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            )
            .into());
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            bytes.extend_from_slice(&chunk);
        }

        let writer = AtomicFileWriter::new(self.dir.clone());
        writer.write(&download_filename(timestamp_millis), &bytes)
    }
}
