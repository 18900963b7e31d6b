//! Phase ordering and independence.

use crate::test_helpers::{Pipeline, full_credentials};
use atelier::connector::adapters::memory::{
    DesktopAction, InMemoryDesktopConnector, InMemoryInferenceFactory,
    InMemoryPrototypingConnector, InMemoryVersionControl, PLACEHOLDER_REPOSITORY_URL,
    VersionControlCall,
};
use atelier::connector::domain::{ConnectorKind, RepositoryUrl};
use atelier::connector::ports::PrototypingError;
use atelier::mission::domain::{HandoffStatus, PhaseKind, RepositorySource};
use atelier::mission::services::{AuditPhaseRequest, PhaseError, WorkspacePhaseRequest};
use atelier::prompt::PromptKind;
use eyre::ensure;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread")]
async fn workspace_phase_runs_from_the_prototyped_repository() -> eyre::Result<()> {
    let mut pipeline = Pipeline::new("blog-app", "A blog with comments", full_credentials())?;

    let prototype = pipeline.orchestrator.run_prototype_phase().await?;
    let workspace = pipeline
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(prototype.clone()))
        .await?;

    ensure!(prototype.repository_url().as_str() == PLACEHOLDER_REPOSITORY_URL);
    ensure!(
        pipeline.version_control.calls()
            == vec![VersionControlCall::Clone {
                url: prototype.repository_url().clone(),
                target: workspace.local_path().to_path_buf(),
            }]
    );
    let prompts = pipeline.prototyping.prompts();
    ensure!(
        prompts.first().map(String::as_str)
            == Some(pipeline.orchestrator.prompt(PromptKind::PrototypingBrief).as_str())
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn skipped_prototype_uses_the_operator_repository() -> eyre::Result<()> {
    let mut pipeline = Pipeline::new("blog-app", "A blog with comments", full_credentials())?;
    let repository_url = RepositoryUrl::new("https://github.com/operator/blog-app")?;

    let workspace = pipeline
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(
            RepositorySource::OperatorSupplied {
                repository_url: repository_url.clone(),
            },
        ))
        .await?;

    ensure!(pipeline.prototyping.invocations() == 0);
    ensure!(workspace.local_path().join(".git").is_dir());
    ensure!(matches!(
        pipeline.version_control.calls().first(),
        Some(VersionControlCall::Clone { url, .. }) if *url == repository_url
    ));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_prototype_leaves_later_phases_usable() -> eyre::Result<()> {
    let mut pipeline = Pipeline::with_connectors(
        "blog-app",
        "A blog with comments",
        InMemoryPrototypingConnector::failing(PrototypingError::Timeout {
            after: Duration::from_secs(300),
        }),
        InMemoryVersionControl::new(),
        InMemoryDesktopConnector::new(),
        InMemoryInferenceFactory::new(full_credentials(), "report"),
    )?;

    let prototype = pipeline.orchestrator.run_prototype_phase().await;
    let audit = pipeline
        .orchestrator
        .run_audit_phase(AuditPhaseRequest::manual())
        .await?;

    ensure!(matches!(
        prototype,
        Err(PhaseError::AutomationTimeout {
            connector: ConnectorKind::WebUi,
            ..
        })
    ));
    ensure!(!audit.is_report());
    let kinds: Vec<_> = pipeline
        .orchestrator
        .phase_results()
        .iter()
        .map(|result| result.kind())
        .collect();
    ensure!(kinds == vec![PhaseKind::Audit]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn desktop_handoff_pastes_the_backend_prompt() -> eyre::Result<()> {
    let mut pipeline = Pipeline::new("blog-app", "A blog with comments", full_credentials())?;
    let prototype = pipeline.orchestrator.run_prototype_phase().await?;

    let workspace = pipeline
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(prototype).with_desktop_handoff(true))
        .await?;

    ensure!(workspace.handoff() == Some(&HandoffStatus::Delivered));
    ensure!(
        pipeline.desktop.actions()
            == vec![
                DesktopAction::Focus,
                DesktopAction::Chat(workspace.backend_prompt().to_string()),
            ]
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_handoff_still_yields_a_workspace() -> eyre::Result<()> {
    let mut pipeline = Pipeline::with_connectors(
        "blog-app",
        "A blog with comments",
        InMemoryPrototypingConnector::new(),
        InMemoryVersionControl::new(),
        InMemoryDesktopConnector::failing("no display"),
        InMemoryInferenceFactory::new(full_credentials(), "report"),
    )?;
    let prototype = pipeline.orchestrator.run_prototype_phase().await?;

    let workspace = pipeline
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(prototype).with_desktop_handoff(true))
        .await?;

    ensure!(matches!(
        workspace.handoff(),
        Some(HandoffStatus::Failed { reason }) if reason.contains("no display")
    ));
    ensure!(workspace.rules_injected());
    Ok(())
}
