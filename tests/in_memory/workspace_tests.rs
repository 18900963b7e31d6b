//! Workspace materialization, clone skipping and policy injection.

use crate::test_helpers::{POLICY_FILE, Pipeline, full_credentials};
use atelier::connector::adapters::memory::{
    InMemoryDesktopConnector, InMemoryInferenceFactory, InMemoryPrototypingConnector,
    InMemoryVersionControl, VersionControlCall,
};
use atelier::connector::domain::BranchName;
use atelier::connector::ports::VersionControlError;
use atelier::mission::services::{PhaseError, WorkspacePhaseRequest};
use atelier::prompt::PromptKind;
use atelier::workspace::WorkspaceError;
use eyre::{OptionExt, ensure};

#[tokio::test(flavor = "multi_thread")]
async fn rerunning_the_phase_reuses_the_checkout() -> eyre::Result<()> {
    let mut pipeline = Pipeline::new("blog-app", "A blog with comments", full_credentials())?;
    let prototype = pipeline.orchestrator.run_prototype_phase().await?;

    let first = pipeline
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(prototype.clone()))
        .await?;
    let second = pipeline
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(prototype))
        .await?;

    ensure!(first.local_path() == second.local_path());
    ensure!(pipeline.version_control.clone_count() == 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn reentry_overwrites_a_stale_policy() -> eyre::Result<()> {
    let mut pipeline = Pipeline::new("blog-app", "A blog with comments", full_credentials())?;
    let prototype = pipeline.orchestrator.run_prototype_phase().await?;
    let first = pipeline
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(prototype.clone()))
        .await?;
    std::fs::write(first.local_path().join(POLICY_FILE), "stale rules")?;

    let second = pipeline
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(prototype))
        .await?;

    let written = std::fs::read_to_string(second.local_path().join(POLICY_FILE))?;
    ensure!(written == pipeline.orchestrator.prompt(PromptKind::EditorPolicy).as_str());
    ensure!(second.rules_injected());
    ensure!(pipeline.version_control.clone_count() == 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn stray_files_without_a_checkout_fail_the_phase() -> eyre::Result<()> {
    let mut pipeline = Pipeline::new("blog-app", "A blog with comments", full_credentials())?;
    let workspace_dir = pipeline.projects.path().join("blog-app");
    std::fs::create_dir_all(&workspace_dir)?;
    std::fs::write(workspace_dir.join(POLICY_FILE), "stale rules")?;
    let prototype = pipeline.orchestrator.run_prototype_phase().await?;

    let result = pipeline
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(prototype))
        .await;

    ensure!(matches!(
        result,
        Err(PhaseError::FilesystemFailure(WorkspaceError::Occupied(_)))
    ));
    ensure!(pipeline.version_control.clone_count() == 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn distinct_missions_use_distinct_workspaces() -> eyre::Result<()> {
    let mut blog = Pipeline::new("blog-app", "A blog with comments", full_credentials())?;
    let mut shop = Pipeline::new("shop-app", "A small web shop", full_credentials())?;

    let blog_prototype = blog.orchestrator.run_prototype_phase().await?;
    let shop_prototype = shop.orchestrator.run_prototype_phase().await?;
    let blog_workspace = blog
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(blog_prototype))
        .await?;
    let shop_workspace = shop
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(shop_prototype))
        .await?;

    ensure!(blog_workspace.local_path().ends_with("blog-app"));
    ensure!(shop_workspace.local_path().ends_with("shop-app"));
    ensure!(blog_workspace.backend_prompt() != shop_workspace.backend_prompt());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn requested_branch_is_created_after_the_clone() -> eyre::Result<()> {
    let mut pipeline = Pipeline::new("blog-app", "A blog with comments", full_credentials())?;
    let prototype = pipeline.orchestrator.run_prototype_phase().await?;
    let branch = BranchName::new("feature/backend")?;

    let workspace = pipeline
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(prototype).with_branch(branch.clone()))
        .await?;

    ensure!(workspace.branch() == Some(&branch));
    let last = pipeline
        .version_control
        .calls()
        .last()
        .cloned()
        .ok_or_eyre("no version-control call recorded")?;
    ensure!(
        last == VersionControlCall::Branch {
            path: workspace.local_path().to_path_buf(),
            name: branch,
        }
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn rerunning_with_the_same_branch_succeeds() -> eyre::Result<()> {
    let mut pipeline = Pipeline::new("blog-app", "A blog with comments", full_credentials())?;
    let prototype = pipeline.orchestrator.run_prototype_phase().await?;
    let branch = BranchName::new("feature/backend")?;
    let request = WorkspacePhaseRequest::new(prototype).with_branch(branch.clone());

    pipeline
        .orchestrator
        .run_workspace_phase(request.clone())
        .await?;
    let second = pipeline.orchestrator.run_workspace_phase(request).await?;

    ensure!(second.branch() == Some(&branch));
    let branch_calls = pipeline
        .version_control
        .calls()
        .into_iter()
        .filter(|call| matches!(call, VersionControlCall::Branch { .. }))
        .count();
    ensure!(branch_calls == 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_clone_fails_the_phase() -> eyre::Result<()> {
    let mut pipeline = Pipeline::with_connectors(
        "blog-app",
        "A blog with comments",
        InMemoryPrototypingConnector::new(),
        InMemoryVersionControl::new().rejecting_clones(),
        InMemoryDesktopConnector::new(),
        InMemoryInferenceFactory::new(full_credentials(), "report"),
    )?;
    let prototype = pipeline.orchestrator.run_prototype_phase().await?;

    let result = pipeline
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(prototype))
        .await;

    ensure!(matches!(
        result,
        Err(PhaseError::VersionControlFailure(
            VersionControlError::CloneFailed { .. }
        ))
    ));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn publishing_commits_the_workspace() -> eyre::Result<()> {
    let mut pipeline = Pipeline::new("blog-app", "A blog with comments", full_credentials())?;
    let prototype = pipeline.orchestrator.run_prototype_phase().await?;
    let workspace = pipeline
        .orchestrator
        .run_workspace_phase(WorkspacePhaseRequest::new(prototype))
        .await?;

    pipeline
        .orchestrator
        .publish_workspace(&workspace, "Add backend")
        .await?;

    ensure!(pipeline.version_control.calls().contains(
        &VersionControlCall::CommitAndPush {
            path: workspace.local_path().to_path_buf(),
            message: "Add backend".to_owned(),
        }
    ));
    Ok(())
}
