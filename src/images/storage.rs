//! Filesystem-level image storage.
//!
//! Files are named `{unix_micros}-{sanitized_original_name}` and created with
//! create-new semantics, so an unlikely name collision fails the upload
//! instead of replacing someone else's image.

use std::path::{Path, PathBuf};

use chrono::Utc;
use schooldir_common::paths::{sanitize_file_name, truncate_file_name};
use schooldir_common::{Error, Result};
use tokio::io::AsyncWriteExt;

/// Where an uploaded image ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Generated file name inside the image directory.
    pub file_name: String,
    /// Browser-resolvable path, `{url_prefix}/{file_name}`.
    pub public_path: String,
}

/// Filesystem manager for uploaded images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    base_dir: PathBuf,
    url_prefix: String,
}

impl ImageStore {
    /// Create a new `ImageStore`.
    ///
    /// # Arguments
    ///
    /// * `base_dir` - Directory images are written to (created on demand)
    /// * `url_prefix` - URL path the directory is served under, e.g. `/schoolImages`
    pub fn new(base_dir: PathBuf, url_prefix: impl Into<String>) -> Self {
        let url_prefix = url_prefix.into().trim_end_matches('/').to_string();
        Self {
            base_dir,
            url_prefix,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Write image bytes under a freshly generated name.
    ///
    /// # Arguments
    ///
    /// * `original_name` - File name supplied by the client
    /// * `data` - Raw image bytes
    ///
    /// # Returns
    ///
    /// * `Ok(StoredImage)` - The generated name and its public path
    /// * `Err(Error::ImageWrite)` - If the directory or file cannot be written
    pub async fn store(&self, original_name: &str, data: &[u8]) -> Result<StoredImage> {
        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| Error::image_write(&self.base_dir, e))?;

        let file_name = generate_file_name(original_name);
        let path = self.base_dir.join(&file_name);

        write_new(&path, data).await?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Stored image");

        Ok(StoredImage {
            public_path: self.public_path(&file_name),
            file_name,
        })
    }

    /// Filesystem path of a stored file name.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.base_dir.join(file_name)
    }

    /// Public URL path of a stored file name.
    pub fn public_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.url_prefix, file_name)
    }
}

/// Create `path` and write `data` to it, failing if the file already exists.
async fn write_new(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| Error::image_write(path, e))?;

    file.write_all(data)
        .await
        .map_err(|e| Error::image_write(path, e))?;
    file.flush().await.map_err(|e| Error::image_write(path, e))?;

    Ok(())
}

/// Longest file name common filesystems accept, in bytes.
const MAX_FILE_NAME_BYTES: usize = 255;

/// Build a unique-enough file name from the current time and the upload name.
/// The upload name is shortened so the whole name fits [`MAX_FILE_NAME_BYTES`].
fn generate_file_name(original_name: &str) -> String {
    let prefix = format!("{}-", Utc::now().timestamp_micros());
    let budget = MAX_FILE_NAME_BYTES.saturating_sub(prefix.len());
    format!(
        "{}{}",
        prefix,
        truncate_file_name(&sanitize_file_name(original_name), budget)
    )
}
