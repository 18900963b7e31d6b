//! UI script describing how to drive the web prototyping studio.

use super::ConnectorDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Element location strategy understood by browser drivers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "using", content = "value", rename_all = "snake_case")]
pub enum Locator {
    /// CSS selector.
    Css(String),
    /// XPath expression.
    XPath(String),
}

impl Locator {
    /// Creates a CSS locator.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorDomainError::EmptyLocator`] for blank selectors.
    pub fn css(selector: impl Into<String>) -> Result<Self, ConnectorDomainError> {
        non_empty(selector.into()).map(Self::Css)
    }

    /// Creates an XPath locator.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorDomainError::EmptyLocator`] for blank expressions.
    pub fn xpath(expression: impl Into<String>) -> Result<Self, ConnectorDomainError> {
        non_empty(expression.into()).map(Self::XPath)
    }

    /// Returns the W3C WebDriver strategy name.
    #[must_use]
    pub const fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css selector",
            Self::XPath(_) => "xpath",
        }
    }

    /// Returns the selector expression.
    #[must_use]
    pub fn expression(&self) -> &str {
        match self {
            Self::Css(value) | Self::XPath(value) => value,
        }
    }
}

fn non_empty(value: String) -> Result<String, ConnectorDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConnectorDomainError::EmptyLocator);
    }
    Ok(trimmed.to_owned())
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy(), self.expression())
    }
}

/// Fixed sequence of UI interactions that turns a prompt into a repository.
///
/// The connector navigates to `start_url`, installs the studio session
/// cookie, clicks `create_project`, fills `prompt_input`, clicks
/// `submit_prompt`, waits for `ready_signal`, clicks `export_repository`,
/// waits for `repository_link` and reads its `link_attribute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrototypingScript {
    /// Entry page of the studio.
    pub start_url: String,
    /// Name of the cookie carrying the studio session token.
    pub session_cookie: String,
    /// Control that starts a new project.
    pub create_project: Locator,
    /// Text area receiving the prototyping brief.
    pub prompt_input: Locator,
    /// Control that submits the brief.
    pub submit_prompt: Locator,
    /// Element whose presence signals that generation finished.
    pub ready_signal: Locator,
    /// Control that exports the project to a repository.
    pub export_repository: Locator,
    /// Element carrying the exported repository address.
    pub repository_link: Locator,
    /// Attribute of `repository_link` holding the address.
    pub link_attribute: String,
    /// Upper bound for the whole interaction sequence.
    pub timeout: Duration,
    /// Interval between presence checks while waiting.
    pub poll_interval: Duration,
}

impl PrototypingScript {
    /// Returns the script with a different overall timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the script with a different polling interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Default for PrototypingScript {
    fn default() -> Self {
        Self {
            start_url: "https://lovable.dev/login".to_owned(),
            session_cookie: "lovable-session-id".to_owned(),
            create_project: Locator::XPath("//button[contains(., 'New Project')]".to_owned()),
            prompt_input: Locator::Css("textarea[placeholder='Describe your app...']".to_owned()),
            submit_prompt: Locator::Css("button[aria-label='Send']".to_owned()),
            ready_signal: Locator::XPath("//*[contains(text(), 'Project ready')]".to_owned()),
            export_repository: Locator::XPath(
                "//button[contains(., 'Push to GitHub')]".to_owned(),
            ),
            repository_link: Locator::Css("a.github-link".to_owned()),
            link_attribute: "href".to_owned(),
            timeout: Duration::from_secs(300),
            poll_interval: Duration::from_secs(2),
        }
    }
}
