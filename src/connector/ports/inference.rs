//! Port contracts for the remote inference service.
//!
//! The inference connector is never built up front. Callers hold an
//! [`InferenceConnectorFactory`] and only call [`connect`] when an audit
//! actually needs the service, because connecting checks the credential and
//! fails immediately without it.
//!
//! [`connect`]: InferenceConnectorFactory::connect

use crate::config::MissingCredentialError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Result type for inference operations.
pub type InferenceResult<T> = Result<T, InferenceError>;

/// Inference-API connector contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InferenceConnector: Send + Sync {
    /// Audits the project at `local_path` against `checklist_text`.
    ///
    /// Returns the service's response text verbatim. Single shot, no retry.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError`] when reading context files, reaching the
    /// service or decoding its answer fails.
    async fn analyze(&self, local_path: &Path, checklist_text: &str) -> InferenceResult<String>;
}

/// Lazily constructs an inference connector.
#[cfg_attr(test, mockall::automock(type Connector = MockInferenceConnector;))]
pub trait InferenceConnectorFactory: Send + Sync {
    /// Connector type produced by this factory.
    type Connector: InferenceConnector;

    /// Builds a connector, checking its readiness first.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::MissingCredential`] when the API key is
    /// absent.
    fn connect(&self) -> InferenceResult<Self::Connector>;
}

/// Errors returned by inference connectors.
#[derive(Debug, Clone, Error)]
pub enum InferenceError {
    /// The API key is not configured.
    #[error(transparent)]
    MissingCredential(#[from] MissingCredentialError),

    /// A context file exists but could not be read.
    #[error("failed to read context file {}: {source}", .path.display())]
    Context {
        /// File that could not be read.
        path: PathBuf,
        /// Read failure.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The service could not be reached or its body could not be read.
    #[error("inference transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The service answered with an error status.
    #[error("inference API returned {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body as returned.
        body: String,
    },

    /// The service answered without any text.
    #[error("inference API returned no text")]
    EmptyResponse,
}

impl InferenceError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
