//! Step definitions for mission pipeline scenarios.

mod given;
mod then;
mod when;
pub mod world;
