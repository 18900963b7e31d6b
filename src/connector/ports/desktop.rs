//! Port contracts for desktop editor automation.
//!
//! Simulated input lands on whatever application holds the operating-system
//! focus. All desktop input in the process is therefore serialized through a
//! single [`InputFocus`] token, and every desktop operation demands one.

use crate::connector::domain::KeyChord;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

/// Result type for desktop connector operations.
pub type DesktopResult<T> = Result<T, DesktopError>;

/// Result type for input simulator operations.
pub type InputResult<T> = Result<T, InputError>;

static INPUT_FOCUS: Mutex<()> = Mutex::const_new(());

/// Exclusive, process-wide right to send simulated input.
///
/// Holding an `InputFocus` keeps every other mission's desktop automation
/// waiting until it is dropped.
#[derive(Debug)]
pub struct InputFocus {
    _guard: MutexGuard<'static, ()>,
}

impl InputFocus {
    /// Waits until no other task holds input focus, then takes it.
    pub async fn acquire() -> Self {
        Self {
            _guard: INPUT_FOCUS.lock().await,
        }
    }
}

/// Desktop-UI automation connector contract.
///
/// Operations only report "completed" or "failed"; nothing verifies which
/// application actually received the input. Callers focus the application
/// immediately before any other operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DesktopConnector: Send + Sync {
    /// Brings the editor to the foreground, launching it if needed.
    async fn focus_application(&self, focus: &InputFocus) -> DesktopResult<()>;

    /// Opens the editor's integrated terminal.
    async fn open_integrated_terminal(&self, focus: &InputFocus) -> DesktopResult<()>;

    /// Creates and saves a file through the editor UI.
    async fn create_file(&self, focus: &InputFocus, name: &str, content: &str)
    -> DesktopResult<()>;

    /// Pastes text into the editor's assistant chat without sending it.
    async fn deliver_text_to_chat(&self, focus: &InputFocus, text: &str) -> DesktopResult<()>;
}

/// Errors returned by desktop connectors.
#[derive(Debug, Clone, Error)]
pub enum DesktopError {
    /// An input event could not be delivered.
    #[error("desktop {operation} failed: {source}")]
    Input {
        /// Desktop operation that was running.
        operation: &'static str,
        /// Underlying simulator failure.
        #[source]
        source: InputError,
    },
}

/// Primitive input events the desktop connector is built from.
#[async_trait]
pub trait InputSimulator: Send + Sync {
    /// Presses a chord of keys together.
    async fn chord(&self, chord: &KeyChord) -> InputResult<()>;

    /// Types literal text.
    async fn type_text(&self, text: &str) -> InputResult<()>;

    /// Replaces the system clipboard contents.
    async fn set_clipboard(&self, text: &str) -> InputResult<()>;
}

/// Errors returned by input simulator adapters.
#[derive(Debug, Clone, Error)]
pub enum InputError {
    /// The helper program could not be started.
    #[error("failed to launch {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Launch failure.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The helper program exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    Exit {
        /// Program that failed.
        program: String,
        /// Exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The simulator rejected the event.
    #[error("input rejected: {0}")]
    Rejected(String),
}
