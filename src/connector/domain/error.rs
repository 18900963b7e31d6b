//! Error types for connector domain validation.

use super::OperationState;
use thiserror::Error;

/// Errors returned while constructing connector domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectorDomainError {
    /// The repository URL is empty after trimming.
    #[error("repository URL must not be empty")]
    EmptyRepositoryUrl,

    /// The repository URL is neither `scheme://...` nor `user@host:path`.
    #[error("repository URL '{0}' is not a recognised remote address")]
    InvalidRepositoryUrl(String),

    /// The branch name violates git ref naming rules.
    #[error("invalid branch name '{0}'")]
    InvalidBranchName(String),

    /// A locator expression is empty after trimming.
    #[error("UI locator must not be empty")]
    EmptyLocator,

    /// Moving an operation between two states is not allowed.
    #[error("invalid operation state transition: {from} -> {to}")]
    InvalidStateTransition {
        /// Current operation state.
        from: OperationState,
        /// Requested operation state.
        to: OperationState,
    },

    /// No operation with the identifier exists in the log.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}
