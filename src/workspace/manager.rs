//! Workspace path resolution and scoped document writes.

use crate::mission::domain::MissionName;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Name of the directory marking a version-control checkout.
const CHECKOUT_MARKER: &str = ".git";

/// Errors returned by workspace operations.
#[derive(Debug, Clone, Error)]
pub enum WorkspaceError {
    /// A filesystem operation failed.
    #[error("filesystem operation on {} failed: {source}", .path.display())]
    Filesystem {
        /// Path the operation targeted.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The workspace holds files but no checkout, so nothing can be cloned
    /// into it.
    #[error("workspace {} is not empty and holds no checkout", .0.display())]
    Occupied(PathBuf),

    /// The document name is not a single plain file name.
    #[error("document name '{0}' must be a single file name")]
    InvalidDocumentName(String),
}

impl WorkspaceError {
    fn filesystem(path: &Path, err: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.to_path_buf(),
            source: Arc::new(err),
        }
    }
}

/// Resolves and prepares per-mission workspaces under a projects root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceManager {
    projects_root: PathBuf,
}

impl WorkspaceManager {
    /// Creates a manager rooted at `projects_root`.
    #[must_use]
    pub fn new(projects_root: impl Into<PathBuf>) -> Self {
        Self {
            projects_root: projects_root.into(),
        }
    }

    /// Returns the workspace path of a mission. Touches nothing.
    #[must_use]
    pub fn resolve(&self, name: &MissionName) -> PathBuf {
        self.projects_root.join(name.as_str())
    }

    /// Creates the projects root and the mission workspace if absent.
    ///
    /// Idempotent: an existing workspace and its contents are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Filesystem`] when a directory cannot be
    /// created.
    pub fn materialize(&self, name: &MissionName) -> Result<PathBuf, WorkspaceError> {
        let path = self.resolve(name);
        Dir::create_ambient_dir_all(&path, ambient_authority())
            .map_err(|err| WorkspaceError::filesystem(&path, err))?;
        Ok(path)
    }

    /// Writes `document` as `filename` at the root of the workspace at
    /// `local_path`, replacing any previous content.
    ///
    /// The write goes through a handle on the workspace directory, so it
    /// cannot land outside it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::InvalidDocumentName`] when `filename` is not
    /// a single plain path component, or [`WorkspaceError::Filesystem`] when
    /// the workspace cannot be opened or written.
    pub fn inject(
        &self,
        local_path: &Path,
        document: &str,
        filename: &str,
    ) -> Result<PathBuf, WorkspaceError> {
        if !is_plain_file_name(filename) {
            return Err(WorkspaceError::InvalidDocumentName(filename.to_owned()));
        }
        let workspace = Dir::open_ambient_dir(local_path, ambient_authority())
            .map_err(|err| WorkspaceError::filesystem(local_path, err))?;
        let target = local_path.join(filename);
        workspace
            .write(filename, document)
            .map_err(|err| WorkspaceError::filesystem(&target, err))?;
        Ok(target)
    }

    /// Returns whether the workspace at `local_path` already holds a
    /// checkout.
    #[must_use]
    pub fn contains_repository(&self, local_path: &Path) -> bool {
        Dir::open_ambient_dir(local_path, ambient_authority())
            .and_then(|workspace| workspace.metadata(CHECKOUT_MARKER))
            .is_ok_and(|metadata| metadata.is_dir())
    }

    /// Checks that a clone can land in the workspace at `local_path`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Occupied`] when the workspace already has
    /// entries, or [`WorkspaceError::Filesystem`] when it cannot be listed.
    pub fn ensure_clone_target(&self, local_path: &Path) -> Result<(), WorkspaceError> {
        let mut entries = Dir::open_ambient_dir(local_path, ambient_authority())
            .and_then(|workspace| workspace.entries())
            .map_err(|err| WorkspaceError::filesystem(local_path, err))?;
        if entries.next().is_some() {
            return Err(WorkspaceError::Occupied(local_path.to_path_buf()));
        }
        Ok(())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
