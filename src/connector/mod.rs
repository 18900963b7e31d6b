//! Connectors over the external automation backends.
//!
//! A connector exposes one backend through a uniform contract: explicit
//! arguments in, a success value or a typed failure out. Four variants exist
//! (web-UI automation, desktop-UI automation, version control and inference
//! API), each with a fixed capability descriptor. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
