//! Missions and the pipeline that carries them from idea to audited code.
//!
//! A mission is a named project with a free-text description. The pipeline
//! runs three phases over it (prototype, workspace, audit), each returning a
//! typed result or a typed failure:
//!
//! - Domain types in [`domain`]
//! - The orchestrator and phase requests in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
