//! Atelier: mission pipeline from idea to audited code.
//!
//! A mission names a project and describes it in free text. Atelier carries
//! it through three phases: a remote prototyping studio builds a first
//! version and exports it to a repository, a local workspace is prepared
//! around a clone of that repository and handed to a desktop editor, and an
//! inference service audits the result.
//!
//! # Architecture
//!
//! Atelier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (browser, git, etc.)
//!
//! # Modules
//!
//! - [`config`]: Credentials and pipeline settings
//! - [`connector`]: Connectors over the automation backends
//! - [`mission`]: Missions and the phase orchestrator
//! - [`prompt`]: Instruction text generation
//! - [`workspace`]: Per-mission local workspaces

pub mod config;
pub mod connector;
pub mod mission;
pub mod prompt;
pub mod workspace;
