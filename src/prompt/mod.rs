//! Instruction text generation for missions.
//!
//! Four prompt kinds exist: the prototyping brief, the editor policy
//! document, the backend implementation brief and the audit checklist. Each
//! is a `minijinja` template interpolated with the mission's name and
//! description. Templates compile once, when [`PromptGenerator::new`] runs,
//! so a broken template fails at start-up rather than mid-pipeline.

mod generator;
mod text;

pub use generator::{PromptError, PromptGenerator, PromptSet};
pub use text::{PromptKind, PromptText};
