//! Port contracts for the web prototyping studio and the browser under it.

use crate::config::MissingCredentialError;
use crate::connector::domain::{ConnectorDomainError, Locator, RepositoryUrl};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for prototyping connector operations.
pub type PrototypingResult<T> = Result<T, PrototypingError>;

/// Result type for browser driver operations.
pub type BrowserResult<T> = Result<T, BrowserError>;

/// Web-UI automation connector contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrototypingConnector: Send + Sync {
    /// Turns a prototyping brief into a remote repository.
    ///
    /// Blocks until the studio reaches the awaited state or the connector's
    /// own timeout elapses. Re-invocation creates a second remote project.
    ///
    /// # Errors
    ///
    /// Returns [`PrototypingError::Timeout`] when the studio does not finish
    /// in time; no partial result is ever returned.
    async fn run_prototyping(&self, prompt_text: &str) -> PrototypingResult<RepositoryUrl>;
}

/// Errors returned by prototyping connectors.
#[derive(Debug, Clone, Error)]
pub enum PrototypingError {
    /// The studio session credential is not configured.
    #[error(transparent)]
    MissingCredential(#[from] MissingCredentialError),

    /// The studio did not reach the awaited state in time.
    #[error("prototyping studio did not finish within {}s", .after.as_secs())]
    Timeout {
        /// Timeout that elapsed.
        after: Duration,
    },

    /// A browser interaction failed.
    #[error("browser automation failed: {0}")]
    Browser(#[from] BrowserError),

    /// The exported project exposes no repository address.
    #[error("exported project exposes no repository link")]
    MissingRepositoryLink,

    /// The studio produced an address that is not a repository URL.
    #[error("studio returned an invalid repository address: {0}")]
    InvalidRepositoryUrl(#[source] ConnectorDomainError),
}

/// Handle of an open browser session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BrowserSession(String);

impl BrowserSession {
    /// Wraps a driver-issued session identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the session identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BrowserSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Low-level browser control used by the scripted prototyping connector.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Opens a new browser session.
    async fn open_session(&self) -> BrowserResult<BrowserSession>;

    /// Navigates the session to `url`.
    async fn navigate(&self, session: &BrowserSession, url: &str) -> BrowserResult<()>;

    /// Sets a cookie for the current document's origin.
    async fn add_cookie(&self, session: &BrowserSession, name: &str, value: &str)
    -> BrowserResult<()>;

    /// Clicks the first element matching `locator`.
    async fn click(&self, session: &BrowserSession, locator: &Locator) -> BrowserResult<()>;

    /// Replaces the value of the first element matching `locator`.
    async fn fill(&self, session: &BrowserSession, locator: &Locator, text: &str)
    -> BrowserResult<()>;

    /// Returns whether an element matching `locator` is present.
    async fn is_present(&self, session: &BrowserSession, locator: &Locator)
    -> BrowserResult<bool>;

    /// Reads an attribute of the first element matching `locator`.
    async fn attribute(
        &self,
        session: &BrowserSession,
        locator: &Locator,
        name: &str,
    ) -> BrowserResult<Option<String>>;

    /// Closes the session and releases the browser.
    async fn close_session(&self, session: &BrowserSession) -> BrowserResult<()>;
}

/// Errors returned by browser driver adapters.
#[derive(Debug, Clone, Error)]
pub enum BrowserError {
    /// No element matches the locator.
    #[error("no element matches {0}")]
    ElementNotFound(Locator),

    /// The driver rejected a command.
    #[error("browser driver error ({code}): {message}")]
    Protocol {
        /// Driver error code.
        code: String,
        /// Driver error message.
        message: String,
    },

    /// The driver could not be reached or answered with an unreadable body.
    #[error("browser transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl BrowserError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
