//! Phase-level failures.

use crate::config::MissingCredentialError;
use crate::connector::domain::{ConnectorDomainError, ConnectorKind};
use crate::connector::ports::{InferenceError, PrototypingError, VersionControlError};
use crate::workspace::WorkspaceError;
use std::time::Duration;
use thiserror::Error;

/// Typed failure of one pipeline phase.
///
/// Each phase reports its own failure; nothing is aggregated across phases.
#[derive(Debug, Clone, Error)]
pub enum PhaseError {
    /// A connector needed by the phase lacks its credential.
    #[error(transparent)]
    MissingCredential(#[from] MissingCredentialError),

    /// A UI automation did not reach its awaited state in time.
    #[error("{connector} automation timed out after {}s", .after.as_secs())]
    AutomationTimeout {
        /// Connector that timed out.
        connector: ConnectorKind,
        /// Timeout that elapsed.
        after: Duration,
    },

    /// A UI automation failed before completing.
    #[error("web automation failed: {0}")]
    AutomationFailure(#[source] PrototypingError),

    /// A version-control operation failed.
    #[error("version control failed: {0}")]
    VersionControlFailure(#[from] VersionControlError),

    /// The workspace could not be prepared.
    #[error("workspace preparation failed: {0}")]
    FilesystemFailure(#[from] WorkspaceError),

    /// The caller invoked a phase without its required input.
    #[error("precondition violated: {0}")]
    PreconditionViolation(&'static str),

    /// The inference service failed.
    #[error("inference failed: {0}")]
    Inference(#[source] InferenceError),

    /// Operation tracking rejected a state change.
    #[error(transparent)]
    Tracking(#[from] ConnectorDomainError),
}

impl From<PrototypingError> for PhaseError {
    fn from(err: PrototypingError) -> Self {
        match err {
            PrototypingError::MissingCredential(missing) => Self::MissingCredential(missing),
            PrototypingError::Timeout { after } => Self::AutomationTimeout {
                connector: ConnectorKind::WebUi,
                after,
            },
            other => Self::AutomationFailure(other),
        }
    }
}

impl From<InferenceError> for PhaseError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::MissingCredential(missing) => Self::MissingCredential(missing),
            other => Self::Inference(other),
        }
    }
}

/// Result type for phase operations.
pub type PhaseOutcome<T> = Result<T, PhaseError>;
