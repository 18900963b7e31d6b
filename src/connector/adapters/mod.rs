//! Adapter implementations for the connector ports.
//!
//! Reference backends: a W3C WebDriver client under the scripted prototyping
//! connector, `xdotool`/`xclip` under the keystroke desktop connector, the
//! `git` binary, and the Gemini API. In-memory adapters live in [`memory`].

pub mod memory;

mod browser;
mod desktop;
mod gemini;
mod git;
mod webdriver;
mod xdotool;

pub use browser::BrowserPrototypingConnector;
pub use desktop::KeystrokeDesktopConnector;
pub use gemini::{GeminiInferenceConnector, GeminiInferenceFactory};
pub use git::GitCliConnector;
pub use webdriver::WebDriverClient;
pub use xdotool::XdotoolInputSimulator;
