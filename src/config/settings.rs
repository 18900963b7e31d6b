//! Non-secret pipeline settings.

use crate::connector::domain::PrototypingScript;
use std::path::PathBuf;
use std::time::Duration;

/// Default directory, relative to the working directory, holding workspaces.
pub const DEFAULT_PROJECTS_ROOT: &str = "projects";

/// Default file name of the editor policy document.
pub const DEFAULT_POLICY_FILENAME: &str = ".cursorrules";

/// Default W3C WebDriver endpoint.
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Settings for the remote inference connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceSettings {
    /// Base URL of the inference API.
    pub endpoint: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Workspace-relative files included as context when present.
    pub context_files: Vec<String>,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com".to_owned(),
            model: "gemini-1.5-pro-latest".to_owned(),
            context_files: ["package.json", "tsconfig.json", "README.md"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Settings for the desktop editor connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopSettings {
    /// Name typed into the system launcher to focus the editor.
    pub application_name: String,
    /// Pause between consecutive simulated inputs.
    pub step_pause: Duration,
    /// Pause after launching or focusing the editor.
    pub launch_pause: Duration,
}

impl DesktopSettings {
    /// Settings with no pauses, for deterministic tests.
    #[must_use]
    pub fn immediate(application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            step_pause: Duration::ZERO,
            launch_pause: Duration::ZERO,
        }
    }
}

impl Default for DesktopSettings {
    fn default() -> Self {
        Self {
            application_name: "Cursor".to_owned(),
            step_pause: Duration::from_millis(500),
            launch_pause: Duration::from_secs(2),
        }
    }
}

/// Complete set of pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Directory under which per-mission workspaces are created.
    pub projects_root: PathBuf,
    /// File name of the editor policy document written into each workspace.
    pub policy_filename: String,
    /// W3C WebDriver endpoint driving the prototyping studio.
    pub webdriver_url: String,
    /// UI script for the prototyping studio.
    pub prototyping: PrototypingScript,
    /// Inference connector settings.
    pub inference: InferenceSettings,
    /// Desktop connector settings.
    pub desktop: DesktopSettings,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            projects_root: PathBuf::from(DEFAULT_PROJECTS_ROOT),
            policy_filename: DEFAULT_POLICY_FILENAME.to_owned(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_owned(),
            prototyping: PrototypingScript::default(),
            inference: InferenceSettings::default(),
            desktop: DesktopSettings::default(),
        }
    }
}
