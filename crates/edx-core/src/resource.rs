//! Reading and atomically replacing the resource header.

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Errors produced while reading or writing the header.
#[derive(thiserror::Error, Debug)]
pub enum ResourceError {
    /// The header does not exist. It is never created.
    #[error("resource.h not found at {}", .0.display())]
    NotFound(PathBuf),

    /// Reading the header failed.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Header path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Writing the replacement header failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Header path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// A resource header on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    path: PathBuf,
}

impl ResourceFile {
    /// Open an existing header.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if `path` is not a regular file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ResourceError> {
        let path = path.into();
        if !path.is_file() {
            return Err(ResourceError::NotFound(path));
        }
        Ok(Self { path })
    }

    /// Path of the header.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole header as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the file disappeared since it
    /// was opened, or [`ResourceError::Read`] for any other IO or decoding
    /// failure.
    pub fn read(&self) -> Result<String, ResourceError> {
        std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(self.path.clone())
            } else {
                ResourceError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })
    }

    /// Replace the header's contents in one step.
    ///
    /// The text goes to a temporary file in the same directory which is then
    /// renamed over the header, so readers never see a partial write.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Write`] if the temporary file cannot be
    /// created, written, or renamed into place.
    pub fn replace(&self, contents: &str) -> Result<(), ResourceError> {
        let write_err = |source: std::io::Error| ResourceError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(contents.as_bytes()).map_err(write_err)?;
        // Temp files are created owner-only; keep the header's own mode.
        if let Ok(meta) = std::fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(write_err)?;
        }
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::debug!(path = %self.path.display(), bytes = contents.len(), "Replaced resource header");
        Ok(())
    }
}
