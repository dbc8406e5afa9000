//! Error types for the core module.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while collecting or loading provisioning choices.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid image family '{0}': choose either 'Ubuntu' or 'Amazon Linux'")]
    InvalidImageFamily(String),

    #[error("Invalid instance type '{0}': choose either 't3.small' or 't3.medium'")]
    InvalidInstanceSize(String),

    #[error("Input closed before {0} was provided")]
    InputClosed(&'static str),

    #[error("Configuration error in {path:?}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CoreError {
    /// Name of the input field this error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CoreError::InvalidImageFamily(_) => Some("image family"),
            CoreError::InvalidInstanceSize(_) => Some("instance type"),
            CoreError::InputClosed(field) => Some(*field),
            _ => None,
        }
    }
}
