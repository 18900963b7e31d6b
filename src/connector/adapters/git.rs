//! Version-control connector shelling out to the `git` binary.

use crate::connector::{
    domain::{BranchName, RepositoryUrl},
    ports::{VersionControlConnector, VersionControlError, VersionControlResult},
};
use async_trait::async_trait;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Output, Stdio};
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Version-control connector running `git` subprocesses.
///
/// Every command runs with an explicit working directory and with terminal
/// prompts disabled, so a missing credential fails instead of hanging.
#[derive(Debug, Clone)]
pub struct GitCliConnector {
    program: String,
}

impl GitCliConnector {
    /// Creates a connector using `git` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Creates a connector using an explicit `git` executable.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn argv<I, A>(args: I) -> Vec<OsString>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        args.into_iter()
            .map(|arg| arg.as_ref().to_os_string())
            .collect()
    }

    fn command_line(&self, argv: &[OsString]) -> String {
        std::iter::once(self.program.clone())
            .chain(argv.iter().map(|arg| arg.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs git with `argv`, reporting it as `command` in logs and errors.
    async fn execute(
        &self,
        working_dir: &Path,
        argv: &[OsString],
        command: &str,
    ) -> VersionControlResult<Output> {
        debug!(command = %command, dir = %working_dir.display(), "running git");
        Command::new(&self.program)
            .args(argv)
            .current_dir(working_dir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|err| VersionControlError::Spawn(Arc::new(err)))
    }

    async fn run_as(
        &self,
        working_dir: &Path,
        argv: &[OsString],
        command: String,
    ) -> VersionControlResult<()> {
        let output = self.execute(working_dir, argv, &command).await?;
        if output.status.success() {
            return Ok(());
        }
        Err(VersionControlError::CommandFailed {
            command,
            path: working_dir.to_path_buf(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        })
    }

    async fn run<I, A>(&self, working_dir: &Path, args: I) -> VersionControlResult<()>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        let argv = Self::argv(args);
        let command = self.command_line(&argv);
        self.run_as(working_dir, &argv, command).await
    }

    /// Runs a query whose exit status is the answer.
    async fn succeeds<I, A>(&self, working_dir: &Path, args: I) -> VersionControlResult<bool>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        let argv = Self::argv(args);
        let command = self.command_line(&argv);
        let output = self.execute(working_dir, &argv, &command).await?;
        Ok(output.status.success())
    }

    async fn branch_exists(&self, path: &Path, name: &BranchName) -> VersionControlResult<bool> {
        let reference = format!("refs/heads/{name}");
        self.succeeds(path, ["rev-parse", "--verify", "--quiet", reference.as_str()])
            .await
    }
}

impl Default for GitCliConnector {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits a clone target into the directory git runs from and the
/// destination argument relative to it.
fn clone_destination(target: &Path) -> (&Path, &OsStr) {
    let parent = target
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    target
        .file_name()
        .map_or((Path::new("."), target.as_os_str()), |name| (parent, name))
}

#[async_trait]
impl VersionControlConnector for GitCliConnector {
    async fn clone_repository(&self, url: &RepositoryUrl, target: &Path) -> bool {
        let (working_dir, destination) = clone_destination(target);
        let argv = Self::argv([OsStr::new("clone"), OsStr::new(url.as_str()), destination]);
        let redacted = url.redacted();
        let command = self
            .command_line(&argv)
            .replace(url.as_str(), &redacted);
        match self.run_as(working_dir, &argv, command).await {
            Ok(()) => {
                info!(repository_url = %redacted, target = %target.display(), "repository cloned");
                true
            }
            Err(err) => {
                let error = err.to_string().replace(url.as_str(), &redacted);
                warn!(repository_url = %redacted, error = %error, "clone failed");
                false
            }
        }
    }

    async fn branch(&self, path: &Path, name: &BranchName) -> VersionControlResult<()> {
        if self.branch_exists(path, name).await? {
            self.run(path, ["checkout", name.as_str()]).await?;
            info!(branch = %name, "existing branch checked out");
        } else {
            self.run(path, ["checkout", "-b", name.as_str()]).await?;
            info!(branch = %name, "working branch created");
        }
        Ok(())
    }

    async fn commit_and_push(&self, path: &Path, message: &str) -> VersionControlResult<()> {
        self.run(path, ["add", "."]).await?;
        self.run(path, ["commit", "-m", message]).await?;
        self.run(path, ["push", "origin", "HEAD"]).await?;
        info!(path = %path.display(), "changes pushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::clone_destination;
    use rstest::rstest;
    use std::ffi::OsStr;
    use std::path::Path;

    #[rstest]
    #[case("projects/blog-app", "projects", "blog-app")]
    #[case("blog-app", ".", "blog-app")]
    #[case("/srv/projects/blog-app", "/srv/projects", "blog-app")]
    fn clones_run_from_the_target_parent(
        #[case] target: &str,
        #[case] working_dir: &str,
        #[case] destination: &str,
    ) {
        assert_eq!(
            clone_destination(Path::new(target)),
            (Path::new(working_dir), OsStr::new(destination))
        );
    }
}
