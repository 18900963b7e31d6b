//! Shared pipeline harness for integration tests.

use std::sync::Arc;

use atelier::config::{CredentialName, Credentials};
use atelier::connector::adapters::memory::{
    InMemoryDesktopConnector, InMemoryInferenceFactory, InMemoryPrototypingConnector,
    InMemoryVersionControl,
};
use atelier::mission::domain::Mission;
use atelier::mission::services::{MissionConnectors, MissionOrchestrator};
use atelier::prompt::PromptGenerator;
use atelier::workspace::WorkspaceManager;
use mockable::DefaultClock;
use tempfile::TempDir;

/// Policy file name used by every harness.
pub const POLICY_FILE: &str = ".cursorrules";

/// Canned report returned by the in-memory inference service.
pub const AUDIT_REPORT: &str = "# Audit\n\nNo blocking findings.";

/// Orchestrator wired to in-memory connectors.
pub type InMemoryOrchestrator = MissionOrchestrator<
    InMemoryPrototypingConnector,
    InMemoryVersionControl,
    InMemoryDesktopConnector,
    InMemoryInferenceFactory,
    DefaultClock,
>;

/// In-memory connectors, a temporary projects root and the orchestrator.
///
/// The connector handles share state with the ones the orchestrator owns, so
/// tests can inspect every call after a phase ran.
pub struct Pipeline {
    /// Web-UI connector handle.
    pub prototyping: InMemoryPrototypingConnector,
    /// Version-control connector handle.
    pub version_control: InMemoryVersionControl,
    /// Desktop connector handle.
    pub desktop: InMemoryDesktopConnector,
    /// Inference factory handle.
    pub inference: InMemoryInferenceFactory,
    /// Temporary projects root; removed on drop.
    pub projects: TempDir,
    /// Orchestrator under test.
    pub orchestrator: InMemoryOrchestrator,
}

/// Credentials with every known key set.
pub fn full_credentials() -> Credentials {
    CredentialName::ALL
        .into_iter()
        .fold(Credentials::empty(), |credentials, name| {
            credentials.with(name, format!("test-{}", name.env_var()))
        })
}

impl Pipeline {
    /// Builds a pipeline for `name` with the given connectors.
    pub fn with_connectors(
        name: &str,
        description: &str,
        prototyping: InMemoryPrototypingConnector,
        version_control: InMemoryVersionControl,
        desktop: InMemoryDesktopConnector,
        inference: InMemoryInferenceFactory,
    ) -> eyre::Result<Self> {
        let projects = TempDir::new()?;
        let mission = Mission::from_input(name, description)?;
        let connectors = MissionConnectors::new(
            Arc::new(prototyping.clone()),
            Arc::new(version_control.clone()),
            Arc::new(desktop.clone()),
            Arc::new(inference.clone()),
        );
        let orchestrator = MissionOrchestrator::new(
            mission,
            connectors,
            WorkspaceManager::new(projects.path()),
            POLICY_FILE,
            &PromptGenerator::new()?,
            Arc::new(DefaultClock),
        )?;
        Ok(Self {
            prototyping,
            version_control,
            desktop,
            inference,
            projects,
            orchestrator,
        })
    }

    /// Builds a pipeline whose connectors all succeed.
    pub fn new(name: &str, description: &str, credentials: Credentials) -> eyre::Result<Self> {
        Self::with_connectors(
            name,
            description,
            InMemoryPrototypingConnector::new(),
            InMemoryVersionControl::new(),
            InMemoryDesktopConnector::new(),
            InMemoryInferenceFactory::new(credentials, AUDIT_REPORT),
        )
    }
}
