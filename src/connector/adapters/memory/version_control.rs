//! In-memory version-control connector.

use crate::connector::{
    domain::{BranchName, RepositoryUrl},
    ports::{VersionControlConnector, VersionControlError, VersionControlResult},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// One call received by [`InMemoryVersionControl`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionControlCall {
    /// A clone request.
    Clone {
        /// Repository that was requested.
        url: RepositoryUrl,
        /// Clone destination.
        target: PathBuf,
    },
    /// A branch creation request.
    Branch {
        /// Repository path.
        path: PathBuf,
        /// Branch that was requested.
        name: BranchName,
    },
    /// A commit-and-push request.
    CommitAndPush {
        /// Repository path.
        path: PathBuf,
        /// Commit message.
        message: String,
    },
}

/// In-memory version-control connector.
///
/// A successful clone creates an empty `.git` directory in the target, which
/// is all a workspace needs to be recognised as a checkout. Like `git`, it
/// refuses a target that already has entries. Nothing else touches the
/// filesystem.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVersionControl {
    state: Arc<RwLock<VersionControlState>>,
}

#[derive(Debug, Default)]
struct VersionControlState {
    calls: Vec<VersionControlCall>,
    rejections: Rejections,
}

#[derive(Debug, Clone, Copy, Default)]
struct Rejections {
    clones: bool,
    branches: bool,
    pushes: bool,
}

impl InMemoryVersionControl {
    /// Creates a connector on which every operation succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every clone report failure.
    #[must_use]
    pub fn rejecting_clones(self) -> Self {
        self.configure(|state| state.rejections.clones = true)
    }

    /// Makes every branch creation fail.
    #[must_use]
    pub fn rejecting_branches(self) -> Self {
        self.configure(|state| state.rejections.branches = true)
    }

    /// Makes every commit-and-push fail.
    #[must_use]
    pub fn rejecting_pushes(self) -> Self {
        self.configure(|state| state.rejections.pushes = true)
    }

    fn configure(self, apply: impl FnOnce(&mut VersionControlState)) -> Self {
        apply(&mut self.state.write().unwrap_or_else(PoisonError::into_inner));
        self
    }

    /// Returns every call received, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<VersionControlCall> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
            .clone()
    }

    /// Returns how many clones were requested.
    #[must_use]
    pub fn clone_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, VersionControlCall::Clone { .. }))
            .count()
    }

    fn record(&self, call: VersionControlCall) -> Rejections {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.calls.push(call);
        state.rejections
    }
}

fn rejected(command: String, path: &Path) -> VersionControlError {
    VersionControlError::CommandFailed {
        command,
        path: path.to_path_buf(),
        status: "exit status: 128".to_owned(),
        stderr: "rejected by in-memory connector".to_owned(),
    }
}

async fn has_entries(target: &Path) -> bool {
    let Ok(mut entries) = tokio::fs::read_dir(target).await else {
        return false;
    };
    entries.next_entry().await.is_ok_and(|entry| entry.is_some())
}

#[async_trait]
impl VersionControlConnector for InMemoryVersionControl {
    async fn clone_repository(&self, url: &RepositoryUrl, target: &Path) -> bool {
        let rejections = self.record(VersionControlCall::Clone {
            url: url.clone(),
            target: target.to_path_buf(),
        });
        if rejections.clones || has_entries(target).await {
            return false;
        }
        tokio::fs::create_dir_all(target.join(".git")).await.is_ok()
    }

    async fn branch(&self, path: &Path, name: &BranchName) -> VersionControlResult<()> {
        let rejections = self.record(VersionControlCall::Branch {
            path: path.to_path_buf(),
            name: name.clone(),
        });
        if rejections.branches {
            return Err(rejected(format!("git checkout -b {name}"), path));
        }
        Ok(())
    }

    async fn commit_and_push(&self, path: &Path, message: &str) -> VersionControlResult<()> {
        let rejections = self.record(VersionControlCall::CommitAndPush {
            path: path.to_path_buf(),
            message: message.to_owned(),
        });
        if rejections.pushes {
            return Err(rejected("git push origin HEAD".to_owned(), path));
        }
        Ok(())
    }
}
