use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why the last load attempt failed.
///
/// Stored on the loader rather than returned. The `Display` output is the
/// fixed message reported through
/// [`DeploymentInfoLoader::error`](super::DeploymentInfoLoader::error).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("Deployment info file does not exist or does not have a .json extension")]
    InvalidPath(PathBuf),

    #[error("Deployment info file does not contain valid JSON")]
    InvalidJson { path: PathBuf, reason: String },
}

impl LoadError {
    pub(crate) fn invalid_json(path: &Path, reason: impl ToString) -> Self {
        Self::InvalidJson {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// The path of the attempt that failed.
    pub fn path(&self) -> &Path {
        match self {
            Self::InvalidPath(path) | Self::InvalidJson { path, .. } => path,
        }
    }

    /// Underlying read or parse failure, when there is one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::InvalidPath(_) => None,
            Self::InvalidJson { reason, .. } => Some(reason),
        }
    }
}
