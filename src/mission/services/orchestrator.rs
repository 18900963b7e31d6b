//! Three-phase mission pipeline.

use super::{AuditMode, AuditPhaseRequest, PhaseError, PhaseOutcome, WorkspacePhaseRequest};
use crate::connector::{
    domain::{ConnectorKind, OperationId, OperationLog},
    ports::{
        DesktopConnector, InferenceConnector, InferenceConnectorFactory, InputFocus,
        PrototypingConnector, VersionControlConnector, VersionControlError,
    },
};
use crate::mission::domain::{
    AuditResult, HandoffStatus, Mission, PhaseKind, PhaseResult, PrototypeResult, WorkspaceResult,
};
use crate::prompt::{PromptError, PromptGenerator, PromptKind, PromptSet, PromptText};
use crate::workspace::WorkspaceManager;
use mockable::Clock;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// The four connectors a mission drives.
///
/// The inference connector is held as a factory and only built when an
/// automatic audit runs.
pub struct MissionConnectors<P, V, D, F> {
    prototyping: Arc<P>,
    version_control: Arc<V>,
    desktop: Arc<D>,
    inference: Arc<F>,
}

impl<P, V, D, F> MissionConnectors<P, V, D, F>
where
    P: PrototypingConnector,
    V: VersionControlConnector,
    D: DesktopConnector,
    F: InferenceConnectorFactory,
{
    /// Bundles the connectors of one pipeline.
    #[must_use]
    pub const fn new(
        prototyping: Arc<P>,
        version_control: Arc<V>,
        desktop: Arc<D>,
        inference: Arc<F>,
    ) -> Self {
        Self {
            prototyping,
            version_control,
            desktop,
            inference,
        }
    }
}

/// Drives one mission through prototype, workspace and audit phases.
///
/// The caller invokes each phase in order and decides, from each result or
/// failure, whether to carry on, substitute a manual value, or stop. Phases
/// take `&mut self`, so a mission never has two connector operations in
/// flight.
pub struct MissionOrchestrator<P, V, D, F, C>
where
    P: PrototypingConnector,
    V: VersionControlConnector,
    D: DesktopConnector,
    F: InferenceConnectorFactory,
    C: Clock + Send + Sync,
{
    mission: Mission,
    prompts: PromptSet,
    connectors: MissionConnectors<P, V, D, F>,
    inference: Option<Arc<F::Connector>>,
    workspace: WorkspaceManager,
    policy_filename: String,
    clock: Arc<C>,
    operations: OperationLog,
    results: Vec<PhaseResult>,
}

impl<P, V, D, F, C> MissionOrchestrator<P, V, D, F, C>
where
    P: PrototypingConnector,
    V: VersionControlConnector,
    D: DesktopConnector,
    F: InferenceConnectorFactory,
    C: Clock + Send + Sync,
{
    /// Creates an orchestrator and renders the mission's prompts.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError`] when a prompt cannot be rendered.
    pub fn new(
        mission: Mission,
        connectors: MissionConnectors<P, V, D, F>,
        workspace: WorkspaceManager,
        policy_filename: impl Into<String>,
        generator: &PromptGenerator,
        clock: Arc<C>,
    ) -> Result<Self, PromptError> {
        let prompts = PromptSet::for_mission(generator, &mission)?;
        Ok(Self {
            mission,
            prompts,
            connectors,
            inference: None,
            workspace,
            policy_filename: policy_filename.into(),
            clock,
            operations: OperationLog::new(),
            results: Vec::new(),
        })
    }

    /// Returns the mission being driven.
    #[must_use]
    pub const fn mission(&self) -> &Mission {
        &self.mission
    }

    /// Returns the mission's prompt of `kind`.
    #[must_use]
    pub const fn prompt(&self, kind: PromptKind) -> &PromptText {
        self.prompts.get(kind)
    }

    /// Returns the results of the phases that succeeded so far, in order.
    #[must_use]
    pub fn phase_results(&self) -> &[PhaseResult] {
        &self.results
    }

    /// Returns every connector operation issued so far.
    #[must_use]
    pub const fn operations(&self) -> &OperationLog {
        &self.operations
    }

    /// Runs the prototype phase.
    ///
    /// Submits the prototyping brief to the web-UI connector and returns the
    /// exported repository. Running it twice creates two remote projects.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::MissingCredential`],
    /// [`PhaseError::AutomationTimeout`] or [`PhaseError::AutomationFailure`].
    pub async fn run_prototype_phase(&mut self) -> PhaseOutcome<PrototypeResult> {
        self.log_started(PhaseKind::Prototype);
        let prompt = self.prompts.get(PromptKind::PrototypingBrief).clone();

        let id = self.begin(ConnectorKind::WebUi, "run_prototyping")?;
        let outcome = self
            .connectors
            .prototyping
            .run_prototyping(prompt.as_str())
            .await;
        self.finish(id, &outcome)?;

        let result = PrototypeResult::new(outcome?);
        self.results.push(PhaseResult::Prototype(result.clone()));
        self.log_finished(PhaseKind::Prototype);
        Ok(result)
    }

    /// Runs the workspace phase.
    ///
    /// Materializes the workspace, clones into it unless it already holds a
    /// checkout, creates the requested branch, writes the editor policy and,
    /// when asked, pastes the backend prompt into the desktop editor. The
    /// desktop handoff is advisory: its outcome is recorded in the result and
    /// never fails the phase.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::FilesystemFailure`], also when the workspace
    /// holds files but no checkout, or [`PhaseError::VersionControlFailure`].
    pub async fn run_workspace_phase(
        &mut self,
        request: WorkspacePhaseRequest,
    ) -> PhaseOutcome<WorkspaceResult> {
        self.log_started(PhaseKind::Workspace);
        let local_path = self.workspace.materialize(self.mission.name())?;

        if self.workspace.contains_repository(&local_path) {
            info!(path = %local_path.display(), "workspace already holds a checkout; skipping clone");
        } else {
            self.workspace.ensure_clone_target(&local_path)?;
            self.clone_into(&request, &local_path).await?;
        }

        if let Some(branch) = request.branch() {
            let id = self.begin(ConnectorKind::VersionControl, "branch")?;
            let outcome = self
                .connectors
                .version_control
                .branch(&local_path, branch)
                .await;
            self.finish(id, &outcome)?;
            outcome?;
        }

        let policy = self.prompts.get(PromptKind::EditorPolicy).as_str();
        let policy_path = self
            .workspace
            .inject(&local_path, policy, &self.policy_filename)?;
        info!(path = %policy_path.display(), "editor policy written");

        let backend_prompt = self.prompts.get(PromptKind::BackendBrief).clone();
        let mut result = WorkspaceResult::new(local_path, true, backend_prompt);
        if let Some(branch) = request.branch() {
            result = result.with_branch(branch.clone());
        }
        if request.automate_desktop_handoff() {
            let status = self.hand_off(result.backend_prompt().as_str()).await?;
            if let HandoffStatus::Failed { reason } = &status {
                warn!(mission = %self.mission.name(), reason, "desktop handoff failed; continuing");
            }
            result = result.with_handoff(status);
        }

        self.results.push(PhaseResult::Workspace(result.clone()));
        self.log_finished(PhaseKind::Workspace);
        Ok(result)
    }

    /// Runs the audit phase.
    ///
    /// A manual audit returns the checklist as the plan. An automatic audit
    /// needs the workspace result and builds the inference connector on first
    /// use.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::PreconditionViolation`] for an automatic audit
    /// without a workspace, before the inference connector is touched;
    /// otherwise [`PhaseError::MissingCredential`] or
    /// [`PhaseError::Inference`].
    pub async fn run_audit_phase(
        &mut self,
        request: AuditPhaseRequest<'_>,
    ) -> PhaseOutcome<AuditResult> {
        self.log_started(PhaseKind::Audit);

        let result = match request.mode() {
            AuditMode::Manual => AuditResult::ManualPlan {
                plan_text: self.prompts.get(PromptKind::AuditChecklist).to_string(),
            },
            AuditMode::Automatic => {
                let workspace = request.workspace().ok_or(PhaseError::PreconditionViolation(
                    "automatic audit requires a workspace result",
                ))?;
                self.audit(workspace.local_path()).await?
            }
        };

        self.results.push(PhaseResult::Audit(result.clone()));
        self.log_finished(PhaseKind::Audit);
        Ok(result)
    }

    /// Commits every change in the workspace and pushes it.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::VersionControlFailure`] when any step fails.
    pub async fn publish_workspace(
        &mut self,
        workspace: &WorkspaceResult,
        message: &str,
    ) -> PhaseOutcome<()> {
        let id = self.begin(ConnectorKind::VersionControl, "commit_and_push")?;
        let outcome = self
            .connectors
            .version_control
            .commit_and_push(workspace.local_path(), message)
            .await;
        self.finish(id, &outcome)?;
        outcome?;
        info!(mission = %self.mission.name(), "workspace published");
        Ok(())
    }

    async fn clone_into(
        &mut self,
        request: &WorkspacePhaseRequest,
        local_path: &Path,
    ) -> PhaseOutcome<()> {
        let url = request.source().repository_url();
        let id = self.begin(ConnectorKind::VersionControl, "clone")?;
        let cloned = self
            .connectors
            .version_control
            .clone_repository(url, local_path)
            .await;
        let outcome = if cloned {
            Ok(())
        } else {
            Err("clone reported failure")
        };
        self.finish(id, &outcome)?;

        if !cloned {
            return Err(VersionControlError::CloneFailed {
                url: url.clone(),
                target: local_path.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }

    async fn hand_off(&mut self, backend_prompt: &str) -> PhaseOutcome<HandoffStatus> {
        let focus = InputFocus::acquire().await;

        let id = self.begin(ConnectorKind::DesktopUi, "focus_application")?;
        let focused = self.connectors.desktop.focus_application(&focus).await;
        self.finish(id, &focused)?;
        if let Err(err) = focused {
            return Ok(HandoffStatus::Failed {
                reason: err.to_string(),
            });
        }

        let id = self.begin(ConnectorKind::DesktopUi, "deliver_text_to_chat")?;
        let delivered = self
            .connectors
            .desktop
            .deliver_text_to_chat(&focus, backend_prompt)
            .await;
        self.finish(id, &delivered)?;

        Ok(delivered.map_or_else(
            |err| HandoffStatus::Failed {
                reason: err.to_string(),
            },
            |()| HandoffStatus::Delivered,
        ))
    }

    async fn audit(&mut self, local_path: &Path) -> PhaseOutcome<AuditResult> {
        let connector = self.inference_connector()?;
        let checklist = self.prompts.get(PromptKind::AuditChecklist).clone();

        let id = self.begin(ConnectorKind::InferenceApi, "analyze")?;
        let outcome = connector.analyze(local_path, checklist.as_str()).await;
        self.finish(id, &outcome)?;

        Ok(AuditResult::Report {
            report_text: outcome?,
        })
    }

    fn inference_connector(&mut self) -> PhaseOutcome<Arc<F::Connector>> {
        if let Some(connector) = &self.inference {
            return Ok(Arc::clone(connector));
        }
        info!("building inference connector");
        let connector = Arc::new(self.connectors.inference.connect()?);
        self.inference = Some(Arc::clone(&connector));
        Ok(connector)
    }

    fn begin(&mut self, connector: ConnectorKind, operation: &str) -> PhaseOutcome<OperationId> {
        self.operations
            .begin(connector, operation, &*self.clock)
            .map_err(PhaseError::from)
    }

    fn finish<T, E>(&mut self, id: OperationId, outcome: &Result<T, E>) -> PhaseOutcome<()>
    where
        E: fmt::Display,
    {
        let status = outcome.as_ref().map(|_| ()).map_err(ToString::to_string);
        self.operations
            .complete(id, status, &*self.clock)
            .map_err(PhaseError::from)
    }

    fn log_started(&self, phase: PhaseKind) {
        info!(mission = %self.mission.name(), %phase, "phase started");
    }

    fn log_finished(&self, phase: PhaseKind) {
        info!(mission = %self.mission.name(), %phase, "phase finished");
    }
}
