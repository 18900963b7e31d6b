//! X11 input simulation through the `xdotool` and `xclip` helpers.

use crate::connector::{
    domain::KeyChord,
    ports::{InputError, InputResult, InputSimulator},
};
use async_trait::async_trait;
use std::process::{Output, Stdio};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Delay between typed characters, in milliseconds.
const TYPE_DELAY_MS: &str = "12";

/// Input simulator shelling out to `xdotool` for keys and `xclip` for the
/// clipboard.
#[derive(Debug, Clone)]
pub struct XdotoolInputSimulator {
    xdotool: String,
    xclip: String,
}

impl XdotoolInputSimulator {
    /// Creates a simulator using the helpers found on `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_programs("xdotool", "xclip")
    }

    /// Creates a simulator using explicit helper programs.
    #[must_use]
    pub fn with_programs(xdotool: impl Into<String>, xclip: impl Into<String>) -> Self {
        Self {
            xdotool: xdotool.into(),
            xclip: xclip.into(),
        }
    }

    async fn run_xdotool(&self, args: &[&str]) -> InputResult<()> {
        let output = Command::new(&self.xdotool)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|err| spawn_error(&self.xdotool, err))?;
        check_exit(&self.xdotool, &output)
    }
}

impl Default for XdotoolInputSimulator {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_error(program: &str, err: std::io::Error) -> InputError {
    InputError::Spawn {
        program: program.to_owned(),
        source: Arc::new(err),
    }
}

fn check_exit(program: &str, output: &Output) -> InputResult<()> {
    if output.status.success() {
        return Ok(());
    }
    Err(InputError::Exit {
        program: program.to_owned(),
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
    })
}

#[async_trait]
impl InputSimulator for XdotoolInputSimulator {
    async fn chord(&self, chord: &KeyChord) -> InputResult<()> {
        let keysyms = chord.to_keysyms();
        self.run_xdotool(&["key", "--clearmodifiers", &keysyms]).await
    }

    async fn type_text(&self, text: &str) -> InputResult<()> {
        self.run_xdotool(&["type", "--delay", TYPE_DELAY_MS, "--", text])
            .await
    }

    async fn set_clipboard(&self, text: &str) -> InputResult<()> {
        let mut child = Command::new(&self.xclip)
            .args(["-selection", "clipboard"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| spawn_error(&self.xclip, err))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|err| spawn_error(&self.xclip, err))?;
        }

        // xclip forks to keep serving the selection; only the parent is awaited.
        let status = child
            .wait()
            .await
            .map_err(|err| spawn_error(&self.xclip, err))?;
        if status.success() {
            return Ok(());
        }
        Err(InputError::Exit {
            program: self.xclip.clone(),
            status: status.to_string(),
            stderr: String::new(),
        })
    }
}
