//! Process configuration for Atelier.
//!
//! Credentials are read once at start-up from the environment. Only the
//! primary repository credential decides whether a run counts as configured;
//! every other credential is checked lazily by the connector that needs it.
//! Pipeline settings collect the non-secret knobs the binary exposes as flags.

mod credentials;
mod settings;

pub use credentials::{CredentialName, Credentials, MissingCredentialError, Secret};
pub use settings::{
    DEFAULT_POLICY_FILENAME, DEFAULT_PROJECTS_ROOT, DEFAULT_WEBDRIVER_URL, DesktopSettings,
    InferenceSettings, PipelineSettings,
};
