//! Tracing setup
//!
//! Installs the global subscriber for processes embedding this crate:
//! `RUST_LOG`-style filtering (default `info`) with human-readable or JSON
//! output. Resolver fallbacks log at `warn`/`error` and orchestrator answers
//! at `debug`, so `RUST_LOG=titanium=debug` shows every routing decision.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// Install the global tracing subscriber
pub fn init_tracing(json: bool) -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if json {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    result.map_err(|e| Error::ConfigError(format!("failed to install tracing subscriber: {e}")))
}
