//! # provisio_runner
//!
//! Provisioning tool execution wrapper for provisio.
//!
//! The provisioning engine is an external program. This crate models it as
//! the [`ProvisioningTool`] capability (init, plan, apply, output) so the
//! rest of provisio never touches a subprocess directly.
//!
//! # Features
//!
//! - **Terraform CLI**: runs the `terraform` binary in a working directory
//! - **Output parsing**: turns `terraform output -json` into an [`OutputMapping`]
//! - **Mock Tool**: scripted per-stage responses for tests, with call capture
//!
//! # Example
//!
//! ```rust,no_run
//! use provisio_runner::{ProvisioningTool, TerraformCli, TerraformConfig};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let terraform = TerraformCli::new(TerraformConfig::default());
//!
//!     let result = terraform.init(Path::new("terraform")).await?;
//!     println!("Exit code: {}", result.exit_code);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod mock;
pub mod outputs;
pub mod runner;
pub mod terraform;

pub use config::TerraformConfig;
pub use error::{RunnerError, RunnerResult};
pub use mock::{CapturedCall, MockResponse, MockTool};
pub use outputs::{OutputMapping, OutputValue};
pub use runner::{ProvisioningTool, Stage, ToolResult};
pub use terraform::TerraformCli;
