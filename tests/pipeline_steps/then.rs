//! Then steps for mission pipeline BDD scenarios.

use super::world::PipelineWorld;
use crate::test_helpers::{AUDIT_REPORT, POLICY_FILE};
use atelier::mission::domain::AuditResult;
use atelier::mission::services::PhaseError;
use atelier::prompt::PromptKind;
use eyre::{OptionExt, eyre};
use rstest_bdd_macros::then;

#[then(r#"the workspace "{name}" holds the editor policy"#)]
fn workspace_holds_policy(world: &mut PipelineWorld, name: String) -> Result<(), eyre::Report> {
    let pipeline = world.pipeline()?;
    let policy_path = pipeline.projects.path().join(&name).join(POLICY_FILE);
    let written = std::fs::read_to_string(&policy_path)?;
    if written != pipeline.orchestrator.prompt(PromptKind::EditorPolicy).as_str() {
        return Err(eyre!(
            "policy at {} does not match the rendered prompt",
            policy_path.display()
        ));
    }
    Ok(())
}

#[then("the audit returns the inference report")]
fn audit_returns_report(world: &PipelineWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .audit
        .as_ref()
        .ok_or_eyre("no audit outcome in scenario world")?;
    match outcome {
        Ok(AuditResult::Report { report_text }) if report_text == AUDIT_REPORT => Ok(()),
        other => Err(eyre!("expected the inference report, got {other:?}")),
    }
}

#[then("the audit returns the checklist")]
fn audit_returns_checklist(world: &mut PipelineWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .audit
        .clone()
        .ok_or_eyre("no audit outcome in scenario world")?;
    let checklist = world
        .pipeline()?
        .orchestrator
        .prompt(PromptKind::AuditChecklist)
        .to_string();
    match outcome {
        Ok(AuditResult::ManualPlan { plan_text }) if plan_text == checklist => Ok(()),
        other => Err(eyre!("expected the manual checklist, got {other:?}")),
    }
}

#[then("the audit fails with a precondition violation")]
fn audit_fails_with_precondition(world: &PipelineWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .audit
        .as_ref()
        .ok_or_eyre("no audit outcome in scenario world")?;
    if !matches!(outcome, Err(PhaseError::PreconditionViolation(_))) {
        return Err(eyre!("expected a precondition violation, got {outcome:?}"));
    }
    Ok(())
}

#[then("the number of inference connections is {count:usize}")]
fn inference_connections(world: &mut PipelineWorld, count: usize) -> Result<(), eyre::Report> {
    let connects = world.pipeline()?.inference.connect_count();
    if connects != count {
        return Err(eyre!("expected {count} inference connections, found {connects}"));
    }
    Ok(())
}

#[then("the prototyping studio was never used")]
fn studio_never_used(world: &mut PipelineWorld) -> Result<(), eyre::Report> {
    let invocations = world.pipeline()?.prototyping.invocations();
    if invocations != 0 {
        return Err(eyre!("expected no prototyping runs, found {invocations}"));
    }
    Ok(())
}

#[then(r#"the backend prompt mentions "{text}""#)]
fn backend_prompt_mentions(world: &PipelineWorld, text: String) -> Result<(), eyre::Report> {
    let workspace = world
        .workspace
        .as_ref()
        .ok_or_eyre("no workspace result in scenario world")?;
    if !workspace.backend_prompt().as_str().contains(&text) {
        return Err(eyre!("backend prompt does not mention '{text}'"));
    }
    Ok(())
}
