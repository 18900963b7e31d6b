//! Port contracts for the four connector variants.
//!
//! Every operation takes its mission-scoped inputs as explicit arguments and
//! returns a success value or a typed failure. The low-level
//! [`BrowserDriver`] and [`InputSimulator`] ports sit underneath the web and
//! desktop connectors so their interaction scripts stay backend-agnostic.

pub mod desktop;
pub mod inference;
pub mod prototyping;
pub mod version_control;

pub use desktop::{
    DesktopConnector, DesktopError, DesktopResult, InputError, InputFocus, InputResult,
    InputSimulator,
};
pub use inference::{InferenceConnector, InferenceConnectorFactory, InferenceError, InferenceResult};
pub use prototyping::{
    BrowserDriver, BrowserError, BrowserResult, BrowserSession, PrototypingConnector,
    PrototypingError, PrototypingResult,
};
pub use version_control::{VersionControlConnector, VersionControlError, VersionControlResult};
