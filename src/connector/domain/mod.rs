//! Domain model for connectors.
//!
//! Connector kinds and capability descriptors, the operation lifecycle, and
//! the value objects connectors exchange with the rest of the pipeline:
//! repository addresses, branch names, UI locators and key chords. No
//! infrastructure concerns cross this boundary.

mod capabilities;
mod error;
mod input;
mod operation;
mod script;
mod vcs;

pub use capabilities::{ConnectorCapabilities, ConnectorKind, Readiness};
pub use error::ConnectorDomainError;
pub use input::{Key, KeyChord, Platform};
pub use operation::{OperationId, OperationLog, OperationRecord, OperationState};
pub use script::{Locator, PrototypingScript};
pub use vcs::{BranchName, RepositoryUrl};
