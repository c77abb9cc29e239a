//! Error types for orchestrator queries

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// The configured orchestrator URI cannot be used
    #[error("Invalid orchestrator URI {uri:?}: {reason}")]
    InvalidUri { uri: String, reason: String },

    /// HTTP request to the orchestrator failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Orchestrator answered with a non-success status
    #[error("Orchestrator returned {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// Orchestrator reported an error in the response body
    #[error("Orchestrator error: {0}")]
    ApiError(String),

    /// Failed to parse the orchestrator response
    #[error("Failed to parse orchestrator response: {0}")]
    ParseError(String),
}

impl From<serde_json::Error> for OrchestratorError {
    fn from(e: serde_json::Error) -> Self {
        OrchestratorError::ParseError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
