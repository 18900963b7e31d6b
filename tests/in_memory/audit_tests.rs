//! Audit modes, preconditions and lazy inference construction.

use crate::test_helpers::{AUDIT_REPORT, Pipeline, full_credentials};
use atelier::config::{CredentialName, Credentials};
use atelier::mission::domain::AuditResult;
use atelier::mission::services::{
    AuditMode, AuditPhaseRequest, PhaseError, WorkspacePhaseRequest,
};
use atelier::prompt::PromptKind;
use eyre::ensure;

#[tokio::test(flavor = "multi_thread")]
async fn manual_audit_never_builds_the_inference_connector() -> eyre::Result<()> {
    let mut pipeline = Pipeline::new("blog-app", "A blog with comments", Credentials::empty())?;

    let result = pipeline
        .orchestrator
        .run_audit_phase(AuditPhaseRequest::manual())
        .await?;

    ensure!(
        result
            == AuditResult::ManualPlan {
                plan_text: pipeline
                    .orchestrator
                    .prompt(PromptKind::AuditChecklist)
                    .to_string(),
            }
    );
    ensure!(pipeline.inference.connect_count() == 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn automatic_audit_requires_a_workspace() -> eyre::Result<()> {
    let mut pipeline = Pipeline::new("blog-app", "A blog with comments", full_credentials())?;

    let result = pipeline
        .orchestrator
        .run_audit_phase(AuditPhaseRequest::new(AuditMode::Automatic, None))
        .await;

    ensure!(matches!(result, Err(PhaseError::PreconditionViolation(_))));
    ensure!(pipeline.inference.connect_count() == 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn automatic_audit_analyzes_the_workspace_once_connected() -> eyre::Result<()> {
    let mut pipeline = Pipeline::new("blog-app", "A blog with comments", full_credentials())?;
    let prototype = pipeline.orchestrator.run_prototype_phase().await?;
    let workspace = pipeline
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(prototype))
        .await?;

    let first = pipeline
        .orchestrator
        .run_audit_phase(AuditPhaseRequest::automatic(&workspace))
        .await?;
    let second = pipeline
        .orchestrator
        .run_audit_phase(AuditPhaseRequest::automatic(&workspace))
        .await?;

    ensure!(first.text() == AUDIT_REPORT && second.is_report());
    ensure!(pipeline.inference.connect_count() == 1);
    let requests = pipeline.inference.requests();
    ensure!(requests.len() == 2);
    ensure!(
        requests
            .iter()
            .all(|(path, _)| path.as_path() == workspace.local_path())
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_inference_key_surfaces_only_when_auditing() -> eyre::Result<()> {
    let credentials = Credentials::empty().with(CredentialName::Repository, "gh-token");
    let mut pipeline = Pipeline::new("blog-app", "A blog with comments", credentials)?;
    let prototype = pipeline.orchestrator.run_prototype_phase().await?;
    let workspace = pipeline
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(prototype))
        .await?;

    let result = pipeline
        .orchestrator
        .run_audit_phase(AuditPhaseRequest::automatic(&workspace))
        .await;

    ensure!(matches!(
        result,
        Err(PhaseError::MissingCredential(missing))
            if missing.credential == CredentialName::Inference
    ));
    Ok(())
}
