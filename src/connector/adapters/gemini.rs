//! Inference connector for the Gemini `generateContent` API.

use crate::config::{CredentialName, Credentials, InferenceSettings, Secret};
use crate::connector::{
    domain::ConnectorKind,
    ports::{InferenceConnector, InferenceConnectorFactory, InferenceError, InferenceResult},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Request body of `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Response body of `models/{model}:generateContent`.
#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Inference connector auditing a workspace through Gemini.
#[derive(Debug, Clone)]
pub struct GeminiInferenceConnector {
    http: Client,
    settings: InferenceSettings,
    api_key: Secret,
}

impl GeminiInferenceConnector {
    /// Creates a connector after checking that the API key is configured.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::MissingCredential`] when `GOOGLE_API_KEY`
    /// is absent.
    pub fn new(settings: InferenceSettings, credentials: &Credentials) -> InferenceResult<Self> {
        let api_key = Self::ensure_ready(credentials)?;
        Ok(Self {
            http: Client::new(),
            settings,
            api_key,
        })
    }

    /// Checks the connector's readiness precondition.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::MissingCredential`] when the API key is
    /// absent.
    pub fn ensure_ready(credentials: &Credentials) -> InferenceResult<Secret> {
        ConnectorKind::InferenceApi
            .capabilities()
            .readiness()
            .check(credentials)?;
        Ok(credentials.require(CredentialName::Inference)?.clone())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }

    /// Reads the configured context files that exist under `local_path`.
    async fn read_context(&self, local_path: &Path) -> InferenceResult<Vec<(String, String)>> {
        let mut files = Vec::new();
        for name in &self.settings.context_files {
            let path = local_path.join(name);
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => files.push((name.clone(), text)),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    debug!(file = %path.display(), "context file absent");
                }
                Err(err) => {
                    return Err(InferenceError::Context {
                        path,
                        source: Arc::new(err),
                    });
                }
            }
        }
        Ok(files)
    }
}

/// Assembles the single audit request sent to the model.
fn audit_prompt(context_files: &[(String, String)], checklist_text: &str) -> String {
    let mut prompt = String::from(
        "You are an expert code auditor.\n\nPROJECT CONTEXT:\nSummary of the project files:\n",
    );
    for (name, text) in context_files {
        prompt.push_str(&format!("\n--- {name} ---\n{text}\n"));
    }
    prompt.push_str(&format!(
        "\nTASK:\nCarry out the following audit and propose concrete fixes:\n{checklist_text}\n\n\
         Answer in Markdown.\n"
    ));
    prompt
}

#[async_trait]
impl InferenceConnector for GeminiInferenceConnector {
    async fn analyze(&self, local_path: &Path, checklist_text: &str) -> InferenceResult<String> {
        let context = self.read_context(local_path).await?;
        let prompt = audit_prompt(&context, checklist_text);
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: &prompt }],
            }],
        };

        info!(model = %self.settings.model, context_files = context.len(), "requesting audit");
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(InferenceError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.map_err(InferenceError::transport)?;
            return Err(InferenceError::Api {
                status: status.as_u16(),
                body: body_text,
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(InferenceError::transport)?
            .into_text()
            .ok_or(InferenceError::EmptyResponse)
    }
}

/// Factory building [`GeminiInferenceConnector`] on demand.
#[derive(Debug, Clone)]
pub struct GeminiInferenceFactory {
    settings: InferenceSettings,
    credentials: Credentials,
}

impl GeminiInferenceFactory {
    /// Creates a factory; nothing is checked until [`connect`] runs.
    ///
    /// [`connect`]: InferenceConnectorFactory::connect
    #[must_use]
    pub const fn new(settings: InferenceSettings, credentials: Credentials) -> Self {
        Self {
            settings,
            credentials,
        }
    }
}

impl InferenceConnectorFactory for GeminiInferenceFactory {
    type Connector = GeminiInferenceConnector;

    fn connect(&self) -> InferenceResult<Self::Connector> {
        GeminiInferenceConnector::new(self.settings.clone(), &self.credentials)
    }
}
