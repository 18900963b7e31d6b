//! Version-control value objects shared by connectors and phase results.

use super::ConnectorDomainError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Maximum length for a validated branch name.
const MAX_BRANCH_NAME_LENGTH: usize = 200;

/// Characters git refuses inside ref names.
const FORBIDDEN_BRANCH_CHARS: [char; 8] = [':', '~', '^', '?', '*', '[', '\\', ' '];

/// Validated address of a remote repository.
///
/// Accepts `scheme://...` URLs and scp-like `user@host:path` addresses.
///
/// # Examples
///
///     use atelier::connector::domain::RepositoryUrl;
///
///     let url = RepositoryUrl::new("https://example.com/u/blog-app").expect("valid");
///     assert_eq!(url.as_str(), "https://example.com/u/blog-app");
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryUrl(String);

impl RepositoryUrl {
    /// Creates a validated repository URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorDomainError::EmptyRepositoryUrl`] for blank input
    /// and [`ConnectorDomainError::InvalidRepositoryUrl`] when the value
    /// contains whitespace or matches neither accepted form.
    pub fn new(value: impl Into<String>) -> Result<Self, ConnectorDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(ConnectorDomainError::EmptyRepositoryUrl);
        }

        let has_whitespace = normalized.chars().any(char::is_whitespace);
        if has_whitespace || !(is_scheme_url(normalized) || is_scp_address(normalized)) {
            return Err(ConnectorDomainError::InvalidRepositoryUrl(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the URL with any `user:password@` part of a `scheme://`
    /// address masked, for logs and error messages.
    ///
    /// Scp-like addresses are returned unchanged; their user part names an
    /// account, not a secret.
    #[must_use]
    pub fn redacted(&self) -> Cow<'_, str> {
        let Some((scheme, rest)) = self.0.split_once("://") else {
            return Cow::Borrowed(self.as_str());
        };
        let (authority, path) = rest.split_at(rest.find('/').unwrap_or(rest.len()));
        authority
            .rsplit_once('@')
            .map_or(Cow::Borrowed(self.as_str()), |(_, host)| {
                Cow::Owned(format!("{scheme}://***@{host}{path}"))
            })
    }
}

fn is_scheme_url(value: &str) -> bool {
    value.split_once("://").is_some_and(|(scheme, rest)| {
        !scheme.is_empty()
            && !rest.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

fn is_scp_address(value: &str) -> bool {
    value.split_once('@').is_some_and(|(user, rest)| {
        !user.is_empty()
            && rest
                .split_once(':')
                .is_some_and(|(host, path)| !host.is_empty() && !path.is_empty())
    })
}

impl AsRef<str> for RepositoryUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RepositoryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated git branch name.
///
/// # Examples
///
///     use atelier::connector::domain::BranchName;
///
///     let name = BranchName::new("feature/backend").expect("valid");
///     assert_eq!(name.as_str(), "feature/backend");
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchName(String);

impl BranchName {
    /// Creates a validated branch name.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorDomainError::InvalidBranchName`] when the value is
    /// empty, too long, starts with `-`, contains `..`, or contains a
    /// character git forbids in ref names.
    pub fn new(value: impl Into<String>) -> Result<Self, ConnectorDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if Self::is_invalid(normalized) {
            return Err(ConnectorDomainError::InvalidBranchName(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    fn is_invalid(name: &str) -> bool {
        name.is_empty()
            || name.len() > MAX_BRANCH_NAME_LENGTH
            || name.starts_with('-')
            || name.starts_with('/')
            || name.ends_with('/')
            || name.ends_with(".lock")
            || name.contains("..")
            || name.contains("@{")
            || name
                .chars()
                .any(|c| c.is_control() || c.is_whitespace() || FORBIDDEN_BRANCH_CHARS.contains(&c))
    }

    /// Returns the branch name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
