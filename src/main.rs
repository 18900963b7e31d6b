//! Runs one mission through the Atelier pipeline.
//!
//! Usage:
//!
//! ```text
//! atelier <name> <description> [--skip-prototype --repository-url <url>]
//!         [--branch <name>] [--desktop-handoff] [--audit auto|manual|skip]
//!         [--publish <message>]
//! ```
//!
//! Credentials come from the environment, after an optional `.env` file is
//! loaded: `GITHUB_TOKEN`, `LOVABLE_TOKEN` and `GOOGLE_API_KEY`. Each phase
//! reports its own outcome; a failed phase does not stop later phases that
//! can still run.

use atelier::config::{
    CredentialName, Credentials, DEFAULT_POLICY_FILENAME, DEFAULT_PROJECTS_ROOT,
    DEFAULT_WEBDRIVER_URL, PipelineSettings,
};
use atelier::connector::adapters::{
    BrowserPrototypingConnector, GeminiInferenceFactory, GitCliConnector,
    KeystrokeDesktopConnector, WebDriverClient, XdotoolInputSimulator,
};
use atelier::connector::domain::{BranchName, RepositoryUrl};
use atelier::mission::domain::{Mission, PrototypeResult, RepositorySource, WorkspaceResult};
use atelier::mission::services::{
    AuditMode, AuditPhaseRequest, MissionConnectors, MissionOrchestrator, PhaseError,
    WorkspacePhaseRequest,
};
use atelier::prompt::{PromptGenerator, PromptKind};
use atelier::workspace::WorkspaceManager;
use clap::{Parser, ValueEnum};
use mockable::DefaultClock;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

type Orchestrator = MissionOrchestrator<
    BrowserPrototypingConnector<WebDriverClient>,
    GitCliConnector,
    KeystrokeDesktopConnector<XdotoolInputSimulator>,
    GeminiInferenceFactory,
    DefaultClock,
>;

/// How the audit phase runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AuditChoice {
    /// Ask the inference service for a report.
    Auto,
    /// Print the checklist for a human auditor.
    Manual,
    /// Do not run the audit phase.
    Skip,
}

#[derive(Debug, Parser)]
#[command(name = "atelier", version, about = "Carry a mission from idea to audited code")]
struct Args {
    /// Mission name; also the workspace directory name
    name: String,

    /// Free-text description of the project
    description: String,

    /// Skip the prototype phase; requires --repository-url for the workspace
    #[arg(long)]
    skip_prototype: bool,

    /// Repository to clone when the prototype phase is skipped
    #[arg(long, env = "ATELIER_REPOSITORY_URL")]
    repository_url: Option<String>,

    /// Skip the workspace phase
    #[arg(long)]
    skip_workspace: bool,

    /// Working branch to create after cloning
    #[arg(long)]
    branch: Option<String>,

    /// Paste the backend prompt into the desktop editor's chat
    #[arg(long, env = "ATELIER_DESKTOP_HANDOFF")]
    desktop_handoff: bool,

    /// Audit mode
    #[arg(long, value_enum, default_value_t = AuditChoice::Manual)]
    audit: AuditChoice,

    /// Commit and push the workspace with this message once the audit ran
    #[arg(long)]
    publish: Option<String>,

    /// Directory holding mission workspaces
    #[arg(long, env = "ATELIER_PROJECTS_ROOT", default_value = DEFAULT_PROJECTS_ROOT)]
    projects_root: PathBuf,

    /// File name of the editor policy document
    #[arg(long, env = "ATELIER_POLICY_FILENAME", default_value = DEFAULT_POLICY_FILENAME)]
    policy_filename: String,

    /// W3C WebDriver endpoint
    #[arg(long, env = "ATELIER_WEBDRIVER_URL", default_value = DEFAULT_WEBDRIVER_URL)]
    webdriver_url: String,

    /// Seconds the prototyping studio may take before the phase times out
    #[arg(long, env = "ATELIER_PROTOTYPE_TIMEOUT_SECS")]
    prototype_timeout_secs: Option<u64>,

    /// Inference model identifier
    #[arg(long, env = "ATELIER_INFERENCE_MODEL")]
    inference_model: Option<String>,

    /// Inference API base URL
    #[arg(long, env = "ATELIER_INFERENCE_ENDPOINT")]
    inference_endpoint: Option<String>,

    /// Application name typed into the system launcher
    #[arg(long, env = "ATELIER_EDITOR_APP")]
    editor_app: Option<String>,

    /// Milliseconds to wait after each simulated input
    #[arg(long, env = "ATELIER_INPUT_PAUSE_MS")]
    input_pause_ms: Option<u64>,
}

impl Args {
    fn settings(&self) -> PipelineSettings {
        let mut settings = PipelineSettings {
            projects_root: self.projects_root.clone(),
            policy_filename: self.policy_filename.clone(),
            webdriver_url: self.webdriver_url.clone(),
            ..PipelineSettings::default()
        };
        if let Some(secs) = self.prototype_timeout_secs {
            settings.prototyping.timeout = Duration::from_secs(secs);
        }
        if let Some(model) = &self.inference_model {
            settings.inference.model.clone_from(model);
        }
        if let Some(endpoint) = &self.inference_endpoint {
            settings.inference.endpoint.clone_from(endpoint);
        }
        if let Some(app) = &self.editor_app {
            settings.desktop.application_name.clone_from(app);
        }
        if let Some(pause) = self.input_pause_ms {
            settings.desktop.step_pause = Duration::from_millis(pause);
        }
        settings
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("atelier=info")),
        )
        .init();
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "ignoring unreadable environment file"),
    }

    let args = Args::parse();
    let credentials = Credentials::from_env();
    if !credentials.is_configured() {
        warn!(
            variable = CredentialName::Repository.env_var(),
            "primary repository credential is not set"
        );
    }

    let mission = Mission::from_input(args.name.as_str(), args.description.as_str())?;
    let operator_url = args
        .repository_url
        .as_deref()
        .map(RepositoryUrl::new)
        .transpose()?;
    let branch = args.branch.as_deref().map(BranchName::new).transpose()?;

    let orchestrator = build_orchestrator(&args, mission, credentials)?;
    let mut session = Session {
        orchestrator,
        out: io::stdout().lock(),
        failures: 0,
    };
    info!(mission = %session.orchestrator.mission().name(), "mission started");

    let prototype = if args.skip_prototype {
        None
    } else {
        session.prototype().await?
    };
    let source = prototype.map(RepositorySource::from).or_else(|| {
        operator_url.map(|repository_url| RepositorySource::OperatorSupplied { repository_url })
    });
    let workspace = if args.skip_workspace {
        None
    } else {
        let request = source.map(|repository| {
            let base =
                WorkspacePhaseRequest::new(repository).with_desktop_handoff(args.desktop_handoff);
            match branch {
                Some(name) => base.with_branch(name),
                None => base,
            }
        });
        session.workspace(request).await?
    };

    let audit_mode = match args.audit {
        AuditChoice::Auto => Some(AuditMode::Automatic),
        AuditChoice::Manual => Some(AuditMode::Manual),
        AuditChoice::Skip => None,
    };
    if let Some(mode) = audit_mode {
        session
            .audit(AuditPhaseRequest::new(mode, workspace.as_ref()))
            .await?;
    }
    if let (Some(message), Some(result)) = (args.publish.as_deref(), workspace.as_ref()) {
        session.publish(result, message).await?;
    }
    session.finish()
}

/// Runs the phases the operator selected and reports each outcome.
struct Session<W> {
    orchestrator: Orchestrator,
    out: W,
    failures: usize,
}

impl<W: Write> Session<W> {
    async fn prototype(&mut self) -> io::Result<Option<PrototypeResult>> {
        match self.orchestrator.run_prototype_phase().await {
            Ok(result) => {
                writeln!(self.out, "[prototype] repository: {}", result.repository_url())?;
                Ok(Some(result))
            }
            Err(err) => self.failed("prototype", &err).map(|()| None),
        }
    }

    async fn workspace(
        &mut self,
        request: Option<WorkspacePhaseRequest>,
    ) -> io::Result<Option<WorkspaceResult>> {
        let Some(phase_request) = request else {
            writeln!(
                self.out,
                "[workspace] skipped: no repository available, pass --repository-url"
            )?;
            return Ok(None);
        };
        match self.orchestrator.run_workspace_phase(phase_request).await {
            Ok(result) => {
                report_workspace(&mut self.out, &result)?;
                Ok(Some(result))
            }
            Err(err) => self.failed("workspace", &err).map(|()| None),
        }
    }

    async fn audit(&mut self, request: AuditPhaseRequest<'_>) -> io::Result<()> {
        match self.orchestrator.run_audit_phase(request).await {
            Ok(result) if result.is_report() => {
                writeln!(self.out, "[audit] report:\n{}", result.text())
            }
            Ok(result) => writeln!(self.out, "[audit] manual checklist:\n{}", result.text()),
            Err(err) => self.failed("audit", &err),
        }
    }

    async fn publish(&mut self, workspace: &WorkspaceResult, message: &str) -> io::Result<()> {
        match self.orchestrator.publish_workspace(workspace, message).await {
            Ok(()) => writeln!(self.out, "[publish] changes pushed"),
            Err(err) => self.failed("publish", &err),
        }
    }

    fn failed(&mut self, phase: &str, err: &PhaseError) -> io::Result<()> {
        self.failures += 1;
        warn!(phase, error = %err, "phase failed");
        writeln!(self.out, "[{phase}] failed: {err}")
    }

    fn finish(self) -> Result<(), BoxError> {
        info!(
            mission = %self.orchestrator.mission().name(),
            operations = self.orchestrator.operations().records().len(),
            failures = self.failures,
            "mission finished"
        );
        if self.failures > 0 {
            return Err(format!("{} phase(s) failed", self.failures).into());
        }
        Ok(())
    }
}

fn build_orchestrator(
    args: &Args,
    mission: Mission,
    credentials: Credentials,
) -> Result<Orchestrator, BoxError> {
    let settings = args.settings();
    let driver = WebDriverClient::new(settings.webdriver_url.as_str());
    let connectors = MissionConnectors::new(
        Arc::new(BrowserPrototypingConnector::new(
            driver,
            settings.prototyping,
            credentials.clone(),
        )),
        Arc::new(GitCliConnector::new()),
        Arc::new(KeystrokeDesktopConnector::new(
            XdotoolInputSimulator::new(),
            settings.desktop,
        )),
        Arc::new(GeminiInferenceFactory::new(settings.inference, credentials)),
    );
    let generator = PromptGenerator::new()?;
    let orchestrator = MissionOrchestrator::new(
        mission,
        connectors,
        WorkspaceManager::new(settings.projects_root),
        settings.policy_filename,
        &generator,
        Arc::new(DefaultClock),
    )?;
    Ok(orchestrator)
}

fn report_workspace(out: &mut impl Write, result: &WorkspaceResult) -> io::Result<()> {
    writeln!(out, "[workspace] ready at {}", result.local_path().display())?;
    if let Some(branch) = result.branch() {
        writeln!(out, "[workspace] working branch: {branch}")?;
    }
    if let Some(status) = result.handoff() {
        writeln!(out, "[workspace] desktop handoff: {status:?}")?;
    }
    writeln!(
        out,
        "[workspace] {}:\n{}",
        PromptKind::BackendBrief,
        result.backend_prompt()
    )
}
