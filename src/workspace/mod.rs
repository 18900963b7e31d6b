//! Local workspace management for missions.
//!
//! Each mission works in `<projects_root>/<mission name>`. The manager
//! resolves that path, creates it, and writes policy documents into it. It
//! never clones: populating a workspace is a version-control connector
//! operation.

mod manager;

pub use manager::{WorkspaceError, WorkspaceManager};
