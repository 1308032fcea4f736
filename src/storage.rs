//! Output tree layout: `<output_dir>/<year>-<MM>/<photo_id>.jpg`.

use crate::error::StorageError;
use crate::types::{PeriodKey, PhotoRef};
use std::path::{Path, PathBuf};

/// Writes photos below a fixed output root
///
/// Path derivation is pure: the same period or photo always maps to the
/// same location.
#[derive(Clone, Debug)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Create a storage rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the photos of `period`
    pub fn period_dir(&self, period: &PeriodKey) -> PathBuf {
        self.root.join(period.dir_name())
    }

    /// Destination file of `photo`
    pub fn photo_path(&self, photo: &PhotoRef) -> PathBuf {
        self.period_dir(&photo.period).join(photo.file_name())
    }

    /// Create the directory for `period` (and any missing parents).
    ///
    /// Succeeds if the directory already exists.
    pub async fn ensure_period_dir(&self, period: &PeriodKey) -> Result<PathBuf, StorageError> {
        let path = self.period_dir(period);
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    /// Write the bytes of `photo`, replacing any previous file.
    pub async fn write_photo(
        &self,
        photo: &PhotoRef,
        content: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let path = self.photo_path(photo);
        tokio::fs::write(&path, content)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}
