//! Session orchestration for the realm simulation.
//!
//! This crate wires validated content, mutable world progress and the core
//! resolvers into a single-threaded [`Session`]. The surrounding game drives
//! it one call at a time and receives hero-facing rewards through a
//! [`realm_core::RewardSink`].
//!
//! Modules are organized by responsibility:
//! - [`config`] reads runtime settings from the environment
//! - [`session`] hosts the orchestrator
//! - [`profile`] and [`sink`] provide simple collaborators for tools and tests
pub mod config;
pub mod error;
pub mod profile;
pub mod session;
pub mod sink;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use profile::HeroProfile;
pub use session::Session;
pub use sink::RecordingSink;
