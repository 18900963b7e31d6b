//! In-memory inference connector and factory.

use crate::config::Credentials;
use crate::connector::{
    domain::ConnectorKind,
    ports::{InferenceConnector, InferenceConnectorFactory, InferenceError, InferenceResult},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// In-memory inference connector answering with a canned report.
#[derive(Debug, Clone)]
pub struct InMemoryInferenceConnector {
    report: Result<String, InferenceError>,
    requests: Arc<RwLock<Vec<(PathBuf, String)>>>,
}

impl InMemoryInferenceConnector {
    /// Returns the `(local_path, checklist_text)` pairs analyzed so far.
    #[must_use]
    pub fn requests(&self) -> Vec<(PathBuf, String)> {
        self.requests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl InferenceConnector for InMemoryInferenceConnector {
    async fn analyze(&self, local_path: &Path, checklist_text: &str) -> InferenceResult<String> {
        self.requests
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((local_path.to_path_buf(), checklist_text.to_owned()));
        self.report.clone()
    }
}

/// Factory for [`InMemoryInferenceConnector`].
///
/// Readiness is checked the same way as for the real service: the inference
/// credential must be present in the supplied [`Credentials`]. Connectors
/// produced by one factory share a request log.
#[derive(Debug, Clone)]
pub struct InMemoryInferenceFactory {
    credentials: Credentials,
    report: Result<String, InferenceError>,
    requests: Arc<RwLock<Vec<(PathBuf, String)>>>,
    connects: Arc<AtomicUsize>,
}

impl InMemoryInferenceFactory {
    /// Creates a factory whose connectors answer with `report`.
    #[must_use]
    pub fn new(credentials: Credentials, report: impl Into<String>) -> Self {
        Self::with_outcome(credentials, Ok(report.into()))
    }

    /// Creates a factory whose connectors fail every analysis with `error`.
    #[must_use]
    pub fn failing(credentials: Credentials, error: InferenceError) -> Self {
        Self::with_outcome(credentials, Err(error))
    }

    fn with_outcome(credentials: Credentials, report: Result<String, InferenceError>) -> Self {
        Self {
            credentials,
            report,
            requests: Arc::default(),
            connects: Arc::default(),
        }
    }

    /// Returns how many times [`connect`](InferenceConnectorFactory::connect)
    /// was called, successful or not.
    #[must_use]
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Returns every analysis request made through this factory's connectors.
    #[must_use]
    pub fn requests(&self) -> Vec<(PathBuf, String)> {
        self.requests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl InferenceConnectorFactory for InMemoryInferenceFactory {
    type Connector = InMemoryInferenceConnector;

    fn connect(&self) -> InferenceResult<Self::Connector> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        ConnectorKind::InferenceApi
            .capabilities()
            .readiness()
            .check(&self.credentials)?;
        Ok(InMemoryInferenceConnector {
            report: self.report.clone(),
            requests: Arc::clone(&self.requests),
        })
    }
}
