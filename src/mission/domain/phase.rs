//! Phase results: the artifacts each phase hands to the next.

use crate::connector::domain::{BranchName, RepositoryUrl};
use crate::prompt::PromptText;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The three pipeline phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Web prototyping.
    Prototype,
    /// Local workspace and backend handoff.
    Workspace,
    /// Audit of the workspace.
    Audit,
}

impl PhaseKind {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prototype => "prototype",
            Self::Workspace => "workspace",
            Self::Audit => "audit",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the prototype phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrototypeResult {
    repository_url: RepositoryUrl,
}

impl PrototypeResult {
    /// Wraps the repository produced by the prototyping studio.
    #[must_use]
    pub const fn new(repository_url: RepositoryUrl) -> Self {
        Self { repository_url }
    }

    /// Returns the exported repository.
    #[must_use]
    pub const fn repository_url(&self) -> &RepositoryUrl {
        &self.repository_url
    }
}

/// Where the workspace phase takes its repository from.
///
/// Either the prototype phase produced it, or the operator supplied it
/// because that phase was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RepositorySource {
    /// Output of a prototype phase that actually ran.
    Prototyped(PrototypeResult),
    /// Address typed in by the operator.
    OperatorSupplied {
        /// Repository address.
        repository_url: RepositoryUrl,
    },
}

impl RepositorySource {
    /// Returns the repository to clone.
    #[must_use]
    pub const fn repository_url(&self) -> &RepositoryUrl {
        match self {
            Self::Prototyped(result) => result.repository_url(),
            Self::OperatorSupplied { repository_url } => repository_url,
        }
    }
}

impl From<PrototypeResult> for RepositorySource {
    fn from(result: PrototypeResult) -> Self {
        Self::Prototyped(result)
    }
}

/// Outcome of the advisory desktop handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HandoffStatus {
    /// The backend prompt reached the editor chat.
    Delivered,
    /// The handoff did not complete.
    Failed {
        /// Failure description.
        reason: String,
    },
}

impl HandoffStatus {
    /// Returns whether the prompt was delivered.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Output of the workspace phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceResult {
    local_path: PathBuf,
    rules_injected: bool,
    backend_prompt: PromptText,
    branch: Option<BranchName>,
    handoff: Option<HandoffStatus>,
}

impl WorkspaceResult {
    /// Creates a result for a prepared workspace.
    #[must_use]
    pub const fn new(local_path: PathBuf, rules_injected: bool, backend_prompt: PromptText) -> Self {
        Self {
            local_path,
            rules_injected,
            backend_prompt,
            branch: None,
            handoff: None,
        }
    }

    /// Records the working branch that was created.
    #[must_use]
    pub fn with_branch(mut self, branch: BranchName) -> Self {
        self.branch = Some(branch);
        self
    }

    /// Records the desktop handoff outcome.
    #[must_use]
    pub fn with_handoff(mut self, handoff: HandoffStatus) -> Self {
        self.handoff = Some(handoff);
        self
    }

    /// Returns the workspace directory.
    #[must_use]
    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    /// Returns whether the editor policy document was written.
    #[must_use]
    pub const fn rules_injected(&self) -> bool {
        self.rules_injected
    }

    /// Returns the prompt meant for the desktop editor.
    #[must_use]
    pub const fn backend_prompt(&self) -> &PromptText {
        &self.backend_prompt
    }

    /// Returns the working branch, when one was requested.
    #[must_use]
    pub const fn branch(&self) -> Option<&BranchName> {
        self.branch.as_ref()
    }

    /// Returns the desktop handoff outcome, when one was requested.
    #[must_use]
    pub const fn handoff(&self) -> Option<&HandoffStatus> {
        self.handoff.as_ref()
    }
}

/// Output of the audit phase. Exactly one form is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum AuditResult {
    /// Report returned by the inference service.
    Report {
        /// Report text, verbatim.
        report_text: String,
    },
    /// Checklist for the operator to work through by hand.
    ManualPlan {
        /// Plan text.
        plan_text: String,
    },
}

impl AuditResult {
    /// Returns the report or plan text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Report { report_text } => report_text,
            Self::ManualPlan { plan_text } => plan_text,
        }
    }

    /// Returns whether the result came from the inference service.
    #[must_use]
    pub const fn is_report(&self) -> bool {
        matches!(self, Self::Report { .. })
    }
}

/// Any phase's result, tagged by phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "result", rename_all = "snake_case")]
pub enum PhaseResult {
    /// Prototype phase output.
    Prototype(PrototypeResult),
    /// Workspace phase output.
    Workspace(WorkspaceResult),
    /// Audit phase output.
    Audit(AuditResult),
}

impl PhaseResult {
    /// Returns the phase that produced the result.
    #[must_use]
    pub const fn kind(&self) -> PhaseKind {
        match self {
            Self::Prototype(_) => PhaseKind::Prototype,
            Self::Workspace(_) => PhaseKind::Workspace,
            Self::Audit(_) => PhaseKind::Audit,
        }
    }
}
