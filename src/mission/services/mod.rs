//! Mission pipeline services.
//!
//! [`MissionOrchestrator`] runs the three phases of a mission against the
//! connector ports and the workspace manager. Phase requests carry the
//! caller's choices; phase failures are [`PhaseError`] values the caller
//! inspects before deciding what runs next.

mod error;
mod orchestrator;
mod request;

pub use error::{PhaseError, PhaseOutcome};
pub use orchestrator::{MissionConnectors, MissionOrchestrator};
pub use request::{AuditMode, AuditPhaseRequest, WorkspacePhaseRequest};
