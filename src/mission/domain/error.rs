//! Error types for mission domain validation.

use thiserror::Error;

/// Errors returned while constructing mission values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MissionDomainError {
    /// The mission name is empty after trimming.
    #[error("mission name must not be empty")]
    EmptyName,

    /// The mission name exceeds the maximum length.
    #[error("mission name '{0}' exceeds 100 characters")]
    NameTooLong(String),

    /// The mission name contains characters outside `[a-z0-9_-]` or does
    /// not start with an alphanumeric.
    #[error("invalid mission name '{0}', expected a lowercase slug")]
    InvalidName(String),

    /// The mission description is empty after trimming.
    #[error("mission description must not be empty")]
    EmptyDescription,
}
