//! # provisio_iac
//!
//! Provisioning orchestration and resource validation for provisio.
//!
//! This crate drives Terraform through init, plan and apply, reads the
//! outputs of the apply, and then asks the AWS API whether the resources
//! named in those outputs really exist.
//!
//! ## Features
//!
//! - Fail-fast provisioning driver over any [`provisio_runner::ProvisioningTool`]
//! - Output reader returning a typed mapping instead of swallowing failures
//! - [`CloudInventory`] abstraction with an AWS (EC2 + ELBv2) implementation
//! - Validation result persisted as indented JSON
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use provisio_core::{ChoiceSet, ImageFamily, InstanceSize, ProvisioConfig};
//! use provisio_iac::{AwsInventory, Pipeline};
//! use provisio_runner::{TerraformCli, TerraformConfig};
//!
//! # async fn run() -> provisio_iac::IacResult<()> {
//! let choices = ChoiceSet::new(ImageFamily::Ubuntu, InstanceSize::Small, "us-east-1", "myalb");
//! let tool = Arc::new(TerraformCli::new(TerraformConfig::default()));
//! let pipeline = Pipeline::new(ProvisioConfig::default(), tool);
//!
//! let inventory = Arc::new(AwsInventory::with_region(&choices.region).await);
//! let outcome = pipeline.run(&choices, inventory).await?;
//! println!("{} is {}", outcome.validation.instance_id, outcome.validation.instance_state);
//! # Ok(())
//! # }
//! ```

pub mod driver;
pub mod error;
pub mod inventory;
pub mod pipeline;
pub mod validator;

pub use driver::{ProvisionReport, ProvisioningDriver, StageOutcome};
pub use error::{IacError, IacResult};
pub use inventory::{AwsInventory, CloudInventory, InstanceDetails, LoadBalancerSummary};
pub use pipeline::{Pipeline, PipelineOutcome};
pub use validator::{find_by_dns, ResourceValidator, ValidationResult};
