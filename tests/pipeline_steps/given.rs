//! Given steps for mission pipeline BDD scenarios.

use super::world::PipelineWorld;
use crate::test_helpers::full_credentials;
use atelier::config::Credentials;
use rstest_bdd_macros::given;

#[given(r#"a mission "{name}" described as "{description}""#)]
fn a_mission(world: &mut PipelineWorld, name: String, description: String) {
    world.mission = Some((name, description));
}

#[given("every credential is configured")]
fn every_credential(world: &mut PipelineWorld) {
    world.credentials = full_credentials();
}

#[given("no credential is configured")]
fn no_credential(world: &mut PipelineWorld) {
    world.credentials = Credentials::empty();
}
