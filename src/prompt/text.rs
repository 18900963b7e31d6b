//! Prompt kinds and generated prompt text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The instruction texts a mission needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    /// Brief submitted to the web prototyping studio.
    PrototypingBrief,
    /// Policy document written into the workspace for the desktop editor.
    EditorPolicy,
    /// Backend implementation brief handed to the desktop editor.
    BackendBrief,
    /// Checklist driving the audit. Does not vary by mission.
    AuditChecklist,
}

impl PromptKind {
    /// Every prompt kind.
    pub const ALL: [Self; 4] = [
        Self::PrototypingBrief,
        Self::EditorPolicy,
        Self::BackendBrief,
        Self::AuditChecklist,
    ];

    /// Returns the canonical string form, which is also the template name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrototypingBrief => "prototyping_brief",
            Self::EditorPolicy => "editor_policy",
            Self::BackendBrief => "backend_brief",
            Self::AuditChecklist => "audit_checklist",
        }
    }

    pub(super) const fn template_source(self) -> &'static str {
        match self {
            Self::PrototypingBrief => include_str!("templates/prototyping_brief.j2"),
            Self::EditorPolicy => include_str!("templates/editor_policy.j2"),
            Self::BackendBrief => include_str!("templates/backend_brief.j2"),
            Self::AuditChecklist => include_str!("templates/audit_checklist.j2"),
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generated instruction text. Never mutated after generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptText(String);

impl PromptText {
    /// Wraps generated text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the text as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PromptText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PromptText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
