//! Port contract for version-control operations.

use crate::connector::domain::{BranchName, RepositoryUrl};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Result type for version-control operations.
pub type VersionControlResult<T> = Result<T, VersionControlError>;

/// Version-control connector contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VersionControlConnector: Send + Sync {
    /// Clones `url` into `target`.
    ///
    /// Reports failure as `false`; a failed clone never raises past this
    /// boundary.
    async fn clone_repository(&self, url: &RepositoryUrl, target: &Path) -> bool;

    /// Checks out `name` in the repository at `path`, creating it first when
    /// it does not exist yet. Re-running with the same name is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`VersionControlError`] when the branch cannot be created or
    /// checked out.
    async fn branch(&self, path: &Path, name: &BranchName) -> VersionControlResult<()>;

    /// Stages everything, commits with `message` and pushes `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns [`VersionControlError`] when any step fails.
    async fn commit_and_push(&self, path: &Path, message: &str) -> VersionControlResult<()>;
}

/// Errors returned by version-control connectors.
#[derive(Debug, Clone, Error)]
pub enum VersionControlError {
    /// Cloning reported failure.
    #[error("clone of {} into {} failed", .url.redacted(), .target.display())]
    CloneFailed {
        /// Repository that was cloned.
        url: RepositoryUrl,
        /// Clone destination.
        target: PathBuf,
    },

    /// A version-control command exited unsuccessfully.
    #[error("`{command}` failed in {} ({status}): {stderr}", .path.display())]
    CommandFailed {
        /// Command line that failed.
        command: String,
        /// Repository path the command ran in.
        path: PathBuf,
        /// Exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The version-control tool could not be started.
    #[error("failed to launch version-control tool: {0}")]
    Spawn(#[source] Arc<std::io::Error>),
}
