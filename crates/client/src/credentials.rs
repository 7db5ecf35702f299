//! Service account keyfile handling
//!
//! Backends authenticate with a Google service account JSON keyfile. The
//! checks here run before any network work so a bad path fails fast with a
//! useful message instead of surfacing as an opaque transport error.

use std::path::{Path, PathBuf};

use crate::error::{ClientError, Result};

/// A validated path to a service account JSON keyfile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAccount {
    path: PathBuf,
}

impl ServiceAccount {
    /// Validate that `path` exists and is a regular file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(ClientError::CredentialsNotFound(
                path.display().to_string(),
            ));
        }
        if !path.is_file() {
            return Err(ClientError::CredentialsNotFile(
                path.display().to_string(),
            ));
        }
        Ok(Self { path })
    }

    /// The keyfile location
    pub fn path(&self) -> &Path {
        &self.path
    }
}
