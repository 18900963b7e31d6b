//! Domain model for missions and their phase results.

mod error;
mod mission;
mod phase;

pub use error::MissionDomainError;
pub use mission::{Mission, MissionName};
pub use phase::{
    AuditResult, HandoffStatus, PhaseKind, PhaseResult, PrototypeResult, RepositorySource,
    WorkspaceResult,
};
