//! Error types for titanium
//!
//! Errors raised here are surfaced to the caller. Orchestrator failures have
//! their own type in [`crate::orchestrator::OrchestratorError`] because the
//! topology resolver always recovers from them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A field of the cluster spec holds a value that cannot be used
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Process options could not be loaded
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
