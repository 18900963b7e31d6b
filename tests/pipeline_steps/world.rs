//! Shared world state for mission pipeline BDD scenarios.

use crate::test_helpers::Pipeline;
use atelier::config::Credentials;
use atelier::mission::domain::{AuditResult, PrototypeResult, WorkspaceResult};
use atelier::mission::services::PhaseOutcome;
use eyre::OptionExt;
use rstest::fixture;

/// Scenario world for mission pipeline behaviour tests.
#[derive(Default)]
pub struct PipelineWorld {
    /// Mission name and description from the scenario.
    pub mission: Option<(String, String)>,
    /// Credentials the pipeline is built with.
    pub credentials: Credentials,
    /// Pipeline, built on the first phase step.
    pub pipeline: Option<Pipeline>,
    /// Result of the prototype phase.
    pub prototype: Option<PrototypeResult>,
    /// Result of the workspace phase.
    pub workspace: Option<WorkspaceResult>,
    /// Outcome of the last audit phase.
    pub audit: Option<PhaseOutcome<AuditResult>>,
}

impl PipelineWorld {
    /// Returns the pipeline, building it from the scenario's mission first.
    pub fn pipeline(&mut self) -> eyre::Result<&mut Pipeline> {
        if self.pipeline.is_none() {
            let (name, description) = self
                .mission
                .as_ref()
                .ok_or_eyre("no mission in scenario world")?;
            self.pipeline = Some(Pipeline::new(
                name,
                description,
                self.credentials.clone(),
            )?);
        }
        self.pipeline.as_mut().ok_or_eyre("pipeline was not built")
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PipelineWorld {
    PipelineWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
