//! Mission identity and parameters.

use super::MissionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a mission name.
const MAX_NAME_LENGTH: usize = 100;

/// Validated mission slug.
///
/// The name doubles as the workspace directory name, so it is restricted to
/// lowercase ASCII alphanumerics, `-` and `_`, and must start with an
/// alphanumeric.
///
/// # Examples
///
///     use atelier::mission::domain::MissionName;
///
///     let name = MissionName::new("  Blog-App ").expect("valid");
///     assert_eq!(name.as_str(), "blog-app");
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionName(String);

impl MissionName {
    /// Creates a validated mission name.
    ///
    /// The input is trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`MissionDomainError::EmptyName`] when the value is empty
    /// after trimming, [`MissionDomainError::NameTooLong`] when it exceeds
    /// 100 characters, or [`MissionDomainError::InvalidName`] when it is not
    /// a slug.
    pub fn new(value: impl Into<String>) -> Result<Self, MissionDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(MissionDomainError::EmptyName);
        }

        if normalized.len() > MAX_NAME_LENGTH {
            return Err(MissionDomainError::NameTooLong(raw));
        }

        let starts_alphanumeric = normalized
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric());
        let is_slug = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

        if !(starts_alphanumeric && is_slug) {
            return Err(MissionDomainError::InvalidName(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the mission name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MissionName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MissionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One end-to-end run for a named project.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    name: MissionName,
    description: String,
}

impl Mission {
    /// Creates a mission from a validated name and a description.
    ///
    /// # Errors
    ///
    /// Returns [`MissionDomainError::EmptyDescription`] when the description
    /// is blank.
    pub fn new(name: MissionName, description: impl Into<String>) -> Result<Self, MissionDomainError> {
        let raw = description.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MissionDomainError::EmptyDescription);
        }
        Ok(Self {
            name,
            description: trimmed.to_owned(),
        })
    }

    /// Creates a mission from raw operator input.
    ///
    /// # Errors
    ///
    /// Returns [`MissionDomainError`] when either value fails validation.
    pub fn from_input(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, MissionDomainError> {
        Self::new(MissionName::new(name)?, description)
    }

    /// Returns the mission name.
    #[must_use]
    pub const fn name(&self) -> &MissionName {
        &self.name
    }

    /// Returns the mission description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}
