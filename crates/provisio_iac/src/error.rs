//! Error types for IaC module.

use thiserror::Error;

/// Result type alias for IaC operations.
pub type IacResult<T> = Result<T, IacError>;

/// Errors that can occur during provisioning and validation.
#[derive(Error, Debug)]
pub enum IacError {
    #[error("Terraform not available: {0}")]
    TerraformNotAvailable(String),

    #[error("Terraform init failed:\n{0}")]
    InitFailed(String),

    #[error("Terraform plan failed:\n{0}")]
    PlanFailed(String),

    #[error("Terraform apply failed:\n{0}")]
    ApplyFailed(String),

    #[error("Failed to get Terraform outputs:\n{0}")]
    OutputFailed(String),

    #[error("{0} not found in Terraform output")]
    MissingOutput(String),

    #[error("EC2 instance not found: {0}")]
    InstanceNotFound(String),

    #[error("Load Balancer not found: {0}")]
    LoadBalancerNotFound(String),

    #[error("Cloud provider error: {0}")]
    CloudProvider(String),

    #[error("Template error: {0}")]
    Template(#[from] provisio_templates::TemplateError),

    #[error("Runner error: {0}")]
    Runner(#[from] provisio_runner::RunnerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
