//! When steps for mission pipeline BDD scenarios.

use super::world::{PipelineWorld, run_async};
use atelier::connector::domain::RepositoryUrl;
use atelier::mission::domain::RepositorySource;
use atelier::mission::services::{AuditMode, AuditPhaseRequest, WorkspacePhaseRequest};
use eyre::{OptionExt, WrapErr};
use rstest_bdd_macros::when;

#[when("the prototype phase runs")]
fn prototype_phase_runs(world: &mut PipelineWorld) -> Result<(), eyre::Report> {
    let pipeline = world.pipeline()?;
    let result = run_async(pipeline.orchestrator.run_prototype_phase())
        .wrap_err("prototype phase")?;
    world.prototype = Some(result);
    Ok(())
}

#[when("the workspace phase runs from the prototype")]
fn workspace_from_prototype(world: &mut PipelineWorld) -> Result<(), eyre::Report> {
    let prototype = world
        .prototype
        .clone()
        .ok_or_eyre("no prototype result in scenario world")?;
    let pipeline = world.pipeline()?;
    let result = run_async(
        pipeline
            .orchestrator
            .run_workspace_phase(WorkspacePhaseRequest::new(prototype)),
    )
    .wrap_err("workspace phase")?;
    world.workspace = Some(result);
    Ok(())
}

#[when(r#"the workspace phase runs from "{url}""#)]
fn workspace_from_operator(world: &mut PipelineWorld, url: String) -> Result<(), eyre::Report> {
    let source = RepositorySource::OperatorSupplied {
        repository_url: RepositoryUrl::new(url)?,
    };
    let pipeline = world.pipeline()?;
    let result = run_async(
        pipeline
            .orchestrator
            .run_workspace_phase(WorkspacePhaseRequest::new(source)),
    )
    .wrap_err("workspace phase")?;
    world.workspace = Some(result);
    Ok(())
}

#[when("an automatic audit runs")]
fn automatic_audit_runs(world: &mut PipelineWorld) -> Result<(), eyre::Report> {
    let workspace = world.workspace.clone();
    let pipeline = world.pipeline()?;
    let outcome = run_async(
        pipeline
            .orchestrator
            .run_audit_phase(AuditPhaseRequest::new(AuditMode::Automatic, workspace.as_ref())),
    );
    world.audit = Some(outcome);
    Ok(())
}

#[when("a manual audit runs")]
fn manual_audit_runs(world: &mut PipelineWorld) -> Result<(), eyre::Report> {
    let pipeline = world.pipeline()?;
    let outcome = run_async(
        pipeline
            .orchestrator
            .run_audit_phase(AuditPhaseRequest::manual()),
    );
    world.audit = Some(outcome);
    Ok(())
}
