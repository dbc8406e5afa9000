//! Error types for the runner module.

use thiserror::Error;

/// Result type alias for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Errors that can occur while driving the provisioning tool.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Provisioning tool not available: {0}")]
    ToolNotAvailable(String),

    #[error("Failed to spawn {binary}: {source}")]
    SpawnFailed {
        binary: String,
        source: std::io::Error,
    },

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
