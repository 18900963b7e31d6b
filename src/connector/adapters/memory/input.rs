//! Recording input simulator.

use crate::connector::{
    domain::KeyChord,
    ports::{InputError, InputResult, InputSimulator},
};
use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

/// One primitive input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Keys pressed together.
    Chord(KeyChord),
    /// Literal text typed.
    Type(String),
    /// Clipboard replaced.
    Clipboard(String),
}

/// Input simulator that records events instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct RecordingInputSimulator {
    state: Arc<RwLock<InputState>>,
}

#[derive(Debug, Default)]
struct InputState {
    events: Vec<InputEvent>,
    fail_after: Option<usize>,
}

impl RecordingInputSimulator {
    /// Creates a simulator accepting every event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every event after the first `accepted` ones fail.
    #[must_use]
    pub fn failing_after(self, accepted: usize) -> Self {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fail_after = Some(accepted);
        self
    }

    /// Returns the delivered events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<InputEvent> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .events
            .clone()
    }

    fn deliver(&self, event: InputEvent) -> InputResult<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state
            .fail_after
            .is_some_and(|accepted| state.events.len() >= accepted)
        {
            return Err(InputError::Rejected(format!("{event:?}")));
        }
        state.events.push(event);
        Ok(())
    }
}

#[async_trait]
impl InputSimulator for RecordingInputSimulator {
    async fn chord(&self, chord: &KeyChord) -> InputResult<()> {
        self.deliver(InputEvent::Chord(chord.clone()))
    }

    async fn type_text(&self, text: &str) -> InputResult<()> {
        self.deliver(InputEvent::Type(text.to_owned()))
    }

    async fn set_clipboard(&self, text: &str) -> InputResult<()> {
        self.deliver(InputEvent::Clipboard(text.to_owned()))
    }
}
