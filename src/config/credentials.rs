//! Named credentials and their presence checks.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Credentials the pipeline knows how to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CredentialName {
    /// Token for the remote repository host. Gates the "configured" state.
    Repository,
    /// Session token for the web prototyping studio.
    PrototypingStudio,
    /// API key for the remote inference service.
    Inference,
}

impl CredentialName {
    /// Every known credential, in start-up reporting order.
    pub const ALL: [Self; 3] = [Self::Repository, Self::PrototypingStudio, Self::Inference];

    /// Returns the environment variable the credential is read from.
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Repository => "GITHUB_TOKEN",
            Self::PrototypingStudio => "LOVABLE_TOKEN",
            Self::Inference => "GOOGLE_API_KEY",
        }
    }
}

impl fmt::Display for CredentialName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_var())
    }
}

/// Error raised when an operation needs a credential that is not set.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("missing credential: {credential} is not set")]
pub struct MissingCredentialError {
    /// The absent credential.
    pub credential: CredentialName,
}

/// Secret value whose `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Exposes the secret for the single call that needs it.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Snapshot of the credentials available to this process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    values: BTreeMap<CredentialName, Secret>,
}

impl Credentials {
    /// Creates an empty credential set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads every known credential from the process environment.
    ///
    /// Unset and blank variables are treated as absent.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name.env_var()).ok())
    }

    /// Builds a credential set from an arbitrary lookup function.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(CredentialName) -> Option<String>) -> Self {
        CredentialName::ALL
            .into_iter()
            .fold(Self::empty(), |credentials, name| match lookup(name) {
                Some(value) => credentials.with(name, value),
                None => credentials,
            })
    }

    /// Adds or replaces a credential. Blank values are ignored.
    #[must_use]
    pub fn with(mut self, name: CredentialName, value: impl Into<String>) -> Self {
        let raw = value.into();
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            self.values.insert(name, Secret::new(trimmed));
        }
        self
    }

    /// Returns whether the credential is present.
    #[must_use]
    pub fn contains(&self, name: CredentialName) -> bool {
        self.values.contains_key(&name)
    }

    /// Returns the credential or a [`MissingCredentialError`].
    ///
    /// # Errors
    ///
    /// Returns [`MissingCredentialError`] when the credential is absent.
    pub fn require(&self, name: CredentialName) -> Result<&Secret, MissingCredentialError> {
        self.values
            .get(&name)
            .ok_or(MissingCredentialError { credential: name })
    }

    /// Returns whether the primary repository credential is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.contains(CredentialName::Repository)
    }

    /// Lists the known credentials that are absent.
    #[must_use]
    pub fn missing(&self) -> Vec<CredentialName> {
        CredentialName::ALL
            .into_iter()
            .filter(|name| !self.contains(*name))
            .collect()
    }
}
