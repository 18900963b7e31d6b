//! Connector kinds and their capability descriptors.

use crate::config::{CredentialName, Credentials, MissingCredentialError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four automation backends the pipeline drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorKind {
    /// Remote, visually rendered prototyping studio driven through a browser.
    WebUi,
    /// Desktop editor driven through simulated input events.
    DesktopUi,
    /// Version-control operations executed by an external tool.
    VersionControl,
    /// Remote inference API.
    InferenceApi,
}

impl ConnectorKind {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WebUi => "web_ui",
            Self::DesktopUi => "desktop_ui",
            Self::VersionControl => "version_control",
            Self::InferenceApi => "inference_api",
        }
    }

    /// Returns the fixed capability descriptor of this connector kind.
    #[must_use]
    pub const fn capabilities(self) -> ConnectorCapabilities {
        match self {
            Self::WebUi => ConnectorCapabilities {
                kind: self,
                operations: &["run_prototyping"],
                readiness: Readiness::Credential(CredentialName::PrototypingStudio),
            },
            Self::DesktopUi => ConnectorCapabilities {
                kind: self,
                operations: &[
                    "focus_application",
                    "open_integrated_terminal",
                    "create_file",
                    "deliver_text_to_chat",
                ],
                readiness: Readiness::Always,
            },
            Self::VersionControl => ConnectorCapabilities {
                kind: self,
                operations: &["clone", "branch", "commit_and_push"],
                readiness: Readiness::Always,
            },
            Self::InferenceApi => ConnectorCapabilities {
                kind: self,
                operations: &["analyze"],
                readiness: Readiness::Credential(CredentialName::Inference),
            },
        }
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Precondition a connector checks before it can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// The connector is usable without further configuration.
    Always,
    /// The named credential must be present.
    Credential(CredentialName),
}

impl Readiness {
    /// Evaluates the precondition against the available credentials.
    ///
    /// # Errors
    ///
    /// Returns [`MissingCredentialError`] when a required credential is
    /// absent.
    pub fn check(self, credentials: &Credentials) -> Result<(), MissingCredentialError> {
        match self {
            Self::Always => Ok(()),
            Self::Credential(name) => credentials.require(name).map(|_| ()),
        }
    }
}

/// Fixed operation set and readiness precondition of one connector kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorCapabilities {
    kind: ConnectorKind,
    operations: &'static [&'static str],
    readiness: Readiness,
}

impl ConnectorCapabilities {
    /// Returns the connector kind this descriptor belongs to.
    #[must_use]
    pub const fn kind(&self) -> ConnectorKind {
        self.kind
    }

    /// Returns the operations the connector exposes.
    #[must_use]
    pub const fn operations(&self) -> &'static [&'static str] {
        self.operations
    }

    /// Returns the readiness precondition.
    #[must_use]
    pub const fn readiness(&self) -> Readiness {
        self.readiness
    }

    /// Returns whether the connector exposes the named operation.
    #[must_use]
    pub fn supports(&self, operation: &str) -> bool {
        self.operations.contains(&operation)
    }
}
