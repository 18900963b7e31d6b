//! Phase request payloads.

use crate::connector::domain::BranchName;
use crate::mission::domain::{RepositorySource, WorkspaceResult};

/// Request payload for the workspace phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePhaseRequest {
    source: RepositorySource,
    branch: Option<BranchName>,
    automate_desktop_handoff: bool,
}

impl WorkspacePhaseRequest {
    /// Creates a request cloning the repository named by `source`.
    #[must_use]
    pub fn new(source: impl Into<RepositorySource>) -> Self {
        Self {
            source: source.into(),
            branch: None,
            automate_desktop_handoff: false,
        }
    }

    /// Creates a working branch after cloning.
    #[must_use]
    pub fn with_branch(mut self, branch: BranchName) -> Self {
        self.branch = Some(branch);
        self
    }

    /// Sets whether the backend prompt is pasted into the desktop editor.
    #[must_use]
    pub const fn with_desktop_handoff(mut self, enabled: bool) -> Self {
        self.automate_desktop_handoff = enabled;
        self
    }

    /// Returns the repository source.
    #[must_use]
    pub const fn source(&self) -> &RepositorySource {
        &self.source
    }

    /// Returns the requested working branch.
    #[must_use]
    pub const fn branch(&self) -> Option<&BranchName> {
        self.branch.as_ref()
    }

    /// Returns whether desktop handoff was requested.
    #[must_use]
    pub const fn automate_desktop_handoff(&self) -> bool {
        self.automate_desktop_handoff
    }
}

/// How the audit phase produces its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditMode {
    /// Ask the inference service to audit the workspace.
    Automatic,
    /// Hand the checklist to the operator.
    Manual,
}

/// Request payload for the audit phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditPhaseRequest<'a> {
    workspace: Option<&'a WorkspaceResult>,
    mode: AuditMode,
}

impl<'a> AuditPhaseRequest<'a> {
    /// Creates an audit request.
    #[must_use]
    pub const fn new(mode: AuditMode, workspace: Option<&'a WorkspaceResult>) -> Self {
        Self { workspace, mode }
    }

    /// Creates a manual audit request.
    #[must_use]
    pub const fn manual() -> Self {
        Self::new(AuditMode::Manual, None)
    }

    /// Creates an automatic audit request over `workspace`.
    #[must_use]
    pub const fn automatic(workspace: &'a WorkspaceResult) -> Self {
        Self::new(AuditMode::Automatic, Some(workspace))
    }

    /// Returns the workspace to audit, when one was produced.
    #[must_use]
    pub const fn workspace(&self) -> Option<&'a WorkspaceResult> {
        self.workspace
    }

    /// Returns the audit mode.
    #[must_use]
    pub const fn mode(&self) -> AuditMode {
        self.mode
    }
}
