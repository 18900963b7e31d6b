//! In-memory desktop connector.

use crate::connector::ports::{
    DesktopConnector, DesktopError, DesktopResult, InputError, InputFocus,
};
use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

/// One desktop operation received by [`InMemoryDesktopConnector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopAction {
    /// The editor was brought to the foreground.
    Focus,
    /// The integrated terminal was opened.
    OpenTerminal,
    /// A file was created through the editor.
    CreateFile {
        /// File name.
        name: String,
        /// File content.
        content: String,
    },
    /// Text was pasted into the assistant chat.
    Chat(String),
}

impl DesktopAction {
    const fn operation(&self) -> &'static str {
        match self {
            Self::Focus => "focus_application",
            Self::OpenTerminal => "open_integrated_terminal",
            Self::CreateFile { .. } => "create_file",
            Self::Chat(_) => "deliver_text_to_chat",
        }
    }
}

/// In-memory desktop connector recording the operations it receives.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDesktopConnector {
    state: Arc<RwLock<DesktopState>>,
}

#[derive(Debug, Default)]
struct DesktopState {
    actions: Vec<DesktopAction>,
    failure: Option<String>,
}

impl InMemoryDesktopConnector {
    /// Creates a connector on which every operation completes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a connector on which every operation fails with `reason`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        let connector = Self::new();
        connector
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .failure = Some(reason.into());
        connector
    }

    /// Returns the operations received so far, oldest first.
    #[must_use]
    pub fn actions(&self) -> Vec<DesktopAction> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .actions
            .clone()
    }

    fn perform(&self, action: DesktopAction) -> DesktopResult<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let operation = action.operation();
        state.actions.push(action);
        state.failure.clone().map_or(Ok(()), |reason| {
            Err(DesktopError::Input {
                operation,
                source: InputError::Rejected(reason),
            })
        })
    }
}

#[async_trait]
impl DesktopConnector for InMemoryDesktopConnector {
    async fn focus_application(&self, _focus: &InputFocus) -> DesktopResult<()> {
        self.perform(DesktopAction::Focus)
    }

    async fn open_integrated_terminal(&self, _focus: &InputFocus) -> DesktopResult<()> {
        self.perform(DesktopAction::OpenTerminal)
    }

    async fn create_file(
        &self,
        _focus: &InputFocus,
        name: &str,
        content: &str,
    ) -> DesktopResult<()> {
        self.perform(DesktopAction::CreateFile {
            name: name.to_owned(),
            content: content.to_owned(),
        })
    }

    async fn deliver_text_to_chat(&self, _focus: &InputFocus, text: &str) -> DesktopResult<()> {
        self.perform(DesktopAction::Chat(text.to_owned()))
    }
}
