//! Behaviour tests for the mission pipeline.

mod pipeline_steps;
mod test_helpers;

use pipeline_steps::world::{PipelineWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/mission_pipeline.feature",
    name = "Blog application runs through every phase"
)]
#[tokio::test(flavor = "multi_thread")]
async fn blog_application_end_to_end(world: PipelineWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/mission_pipeline.feature",
    name = "Manual audit needs no inference credential"
)]
#[tokio::test(flavor = "multi_thread")]
async fn manual_audit_without_credentials(world: PipelineWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/mission_pipeline.feature",
    name = "Automatic audit without a workspace is rejected"
)]
#[tokio::test(flavor = "multi_thread")]
async fn automatic_audit_without_workspace(world: PipelineWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/mission_pipeline.feature",
    name = "Operator repository replaces a skipped prototype"
)]
#[tokio::test(flavor = "multi_thread")]
async fn operator_repository_workspace(world: PipelineWorld) {
    let _ = world;
}
