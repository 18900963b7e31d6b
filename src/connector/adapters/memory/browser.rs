//! Scripted in-memory browser driver.

use crate::connector::{
    domain::Locator,
    ports::{BrowserDriver, BrowserError, BrowserResult, BrowserSession},
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

/// One command received by [`ScriptedBrowserDriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserCommand {
    /// A session was opened.
    Open,
    /// The session navigated to a URL.
    Navigate(String),
    /// A cookie was installed.
    AddCookie {
        /// Cookie name.
        name: String,
        /// Cookie value.
        value: String,
    },
    /// An element was clicked.
    Click(Locator),
    /// An element was filled with text.
    Fill(Locator, String),
    /// The page was asked whether an element is present.
    Probe(Locator),
    /// An element attribute was read.
    ReadAttribute(Locator, String),
    /// The session was closed.
    Close,
}

/// Browser driver that pretends every element exists unless told otherwise.
///
/// Hidden locators are never present and fail on interaction, which is how
/// tests simulate a studio that never finishes.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBrowserDriver {
    state: Arc<RwLock<BrowserState>>,
}

#[derive(Debug, Default)]
struct BrowserState {
    commands: Vec<BrowserCommand>,
    hidden: HashSet<Locator>,
    attributes: HashMap<(Locator, String), String>,
    open_sessions: usize,
}

impl ScriptedBrowserDriver {
    /// Creates a driver on which every element is present.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `locator` permanently absent.
    #[must_use]
    pub fn hiding(self, locator: Locator) -> Self {
        self.write().hidden.insert(locator);
        self
    }

    /// Gives the element at `locator` an attribute value.
    #[must_use]
    pub fn with_attribute(
        self,
        locator: Locator,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.write()
            .attributes
            .insert((locator, name.into()), value.into());
        self
    }

    /// Returns every command received, oldest first.
    #[must_use]
    pub fn commands(&self) -> Vec<BrowserCommand> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .commands
            .clone()
    }

    /// Returns how many sessions are still open.
    #[must_use]
    pub fn open_sessions(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .open_sessions
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BrowserState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn interact(&self, locator: &Locator, command: BrowserCommand) -> BrowserResult<()> {
        let mut state = self.write();
        state.commands.push(command);
        if state.hidden.contains(locator) {
            return Err(BrowserError::ElementNotFound(locator.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl BrowserDriver for ScriptedBrowserDriver {
    async fn open_session(&self) -> BrowserResult<BrowserSession> {
        let mut state = self.write();
        state.commands.push(BrowserCommand::Open);
        state.open_sessions += 1;
        Ok(BrowserSession::new(format!("scripted-{}", state.open_sessions)))
    }

    async fn navigate(&self, _session: &BrowserSession, url: &str) -> BrowserResult<()> {
        self.write()
            .commands
            .push(BrowserCommand::Navigate(url.to_owned()));
        Ok(())
    }

    async fn add_cookie(
        &self,
        _session: &BrowserSession,
        name: &str,
        value: &str,
    ) -> BrowserResult<()> {
        self.write().commands.push(BrowserCommand::AddCookie {
            name: name.to_owned(),
            value: value.to_owned(),
        });
        Ok(())
    }

    async fn click(&self, _session: &BrowserSession, locator: &Locator) -> BrowserResult<()> {
        self.interact(locator, BrowserCommand::Click(locator.clone()))
    }

    async fn fill(
        &self,
        _session: &BrowserSession,
        locator: &Locator,
        text: &str,
    ) -> BrowserResult<()> {
        self.interact(locator, BrowserCommand::Fill(locator.clone(), text.to_owned()))
    }

    async fn is_present(&self, _session: &BrowserSession, locator: &Locator) -> BrowserResult<bool> {
        let mut state = self.write();
        state.commands.push(BrowserCommand::Probe(locator.clone()));
        Ok(!state.hidden.contains(locator))
    }

    async fn attribute(
        &self,
        _session: &BrowserSession,
        locator: &Locator,
        name: &str,
    ) -> BrowserResult<Option<String>> {
        self.interact(
            locator,
            BrowserCommand::ReadAttribute(locator.clone(), name.to_owned()),
        )?;
        let key = (locator.clone(), name.to_owned());
        Ok(self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .attributes
            .get(&key)
            .cloned())
    }

    async fn close_session(&self, _session: &BrowserSession) -> BrowserResult<()> {
        let mut state = self.write();
        state.commands.push(BrowserCommand::Close);
        state.open_sessions = state.open_sessions.saturating_sub(1);
        Ok(())
    }
}
