//! Disk-backed object store for uploaded course materials.
//!
//! DESIGN
//! ======
//! Objects live under `<root>/course-materials/<category>/<file>` and are
//! served read-only by the router's static-file layer. Path components are
//! validated, not cleaned: a name carrying separators or parent-dir parts
//! is rejected outright.

use std::path::{Path, PathBuf};

const DEFAULT_STORAGE_ROOT: &str = "./storage";
const MATERIALS_BUCKET: &str = "course-materials";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid object name: {0}")]
    InvalidName(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle on the materials bucket. Cheap to clone; carried in app state.
#[derive(Debug, Clone)]
pub struct MaterialStore {
    root: PathBuf,
}

fn valid_component(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/') && !name.contains('\\')
}

impl MaterialStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load from `STORAGE_ROOT`, defaulting to `./storage`.
    #[must_use]
    pub fn from_env() -> Self {
        let root = std::env::var("STORAGE_ROOT").unwrap_or_else(|_| DEFAULT_STORAGE_ROOT.to_owned());
        Self::new(root)
    }

    /// Directory the static-file layer serves the bucket from.
    #[must_use]
    pub fn bucket_dir(&self) -> PathBuf {
        self.root.join(MATERIALS_BUCKET)
    }

    fn object_path(&self, category: &str, file_name: &str) -> Result<PathBuf, StorageError> {
        if !valid_component(category) {
            return Err(StorageError::InvalidName(category.to_owned()));
        }
        if !valid_component(file_name) {
            return Err(StorageError::InvalidName(file_name.to_owned()));
        }
        Ok(self.bucket_dir().join(category).join(file_name))
    }

    /// Store an object, returning its bucket-relative path
    /// (`<category>/<file>`).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidName`] for unsafe path components,
    /// or an IO error if the write fails.
    pub async fn save(&self, category: &str, file_name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let path = self.object_path(category, file_name)?;
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        Ok(format!("{category}/{file_name}"))
    }

    /// Absolute path of a stored object, without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidName`] for unsafe path components.
    pub fn resolve(&self, category: &str, file_name: &str) -> Result<PathBuf, StorageError> {
        self.object_path(category, file_name)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
