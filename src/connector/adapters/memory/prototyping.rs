//! In-memory web prototyping connector.

use crate::connector::{
    domain::RepositoryUrl,
    ports::{PrototypingConnector, PrototypingError, PrototypingResult},
};
use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

/// Repository address returned when no other outcome is configured.
pub const PLACEHOLDER_REPOSITORY_URL: &str = "https://github.com/atelier-fixtures/prototype";

/// In-memory prototyping connector.
///
/// Every call records the prompt it received and answers with the configured
/// outcome, which defaults to [`PLACEHOLDER_REPOSITORY_URL`].
#[derive(Debug, Clone)]
pub struct InMemoryPrototypingConnector {
    state: Arc<RwLock<PrototypingState>>,
}

#[derive(Debug)]
struct PrototypingState {
    outcome: Result<RepositoryUrl, PrototypingError>,
    prompts: Vec<String>,
}

impl InMemoryPrototypingConnector {
    /// Creates a connector answering with the placeholder repository.
    #[must_use]
    pub fn new() -> Self {
        Self::with_outcome(
            RepositoryUrl::new(PLACEHOLDER_REPOSITORY_URL)
                .map_err(PrototypingError::InvalidRepositoryUrl),
        )
    }

    /// Creates a connector answering with `url`.
    #[must_use]
    pub fn returning(url: RepositoryUrl) -> Self {
        Self::with_outcome(Ok(url))
    }

    /// Creates a connector failing every call with `error`.
    #[must_use]
    pub fn failing(error: PrototypingError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<RepositoryUrl, PrototypingError>) -> Self {
        Self {
            state: Arc::new(RwLock::new(PrototypingState {
                outcome,
                prompts: Vec::new(),
            })),
        }
    }

    /// Returns the prompts received so far, oldest first.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .prompts
            .clone()
    }

    /// Returns how many times the connector was invoked.
    #[must_use]
    pub fn invocations(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .prompts
            .len()
    }
}

impl Default for InMemoryPrototypingConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PrototypingConnector for InMemoryPrototypingConnector {
    async fn run_prototyping(&self, prompt_text: &str) -> PrototypingResult<RepositoryUrl> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.prompts.push(prompt_text.to_owned());
        state.outcome.clone()
    }
}
