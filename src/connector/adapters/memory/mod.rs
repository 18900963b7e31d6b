//! In-memory connector adapters.
//!
//! These adapters model each backend without a browser, a desktop session, a
//! `git` binary or network access. They record every call so tests can
//! assert on the exact interaction, and they can be switched into failure
//! modes to exercise error paths.

mod browser;
mod desktop;
mod inference;
mod input;
mod prototyping;
mod version_control;

pub use browser::{BrowserCommand, ScriptedBrowserDriver};
pub use desktop::{DesktopAction, InMemoryDesktopConnector};
pub use inference::{InMemoryInferenceConnector, InMemoryInferenceFactory};
pub use input::{InputEvent, RecordingInputSimulator};
pub use prototyping::{InMemoryPrototypingConnector, PLACEHOLDER_REPOSITORY_URL};
pub use version_control::{InMemoryVersionControl, VersionControlCall};
