//! CLI command definitions.
//!
//! Running `provisio` with no subcommand is the same as `provisio provision`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use provisio_core::ProvisioConfig;

pub mod check;
pub mod provision;
pub mod render;

/// provisio - provision a small AWS web stack from a few interactive choices
#[derive(Parser)]
#[command(name = "provisio")]
#[command(version, about = "provisio - provision a small AWS web stack from a few interactive choices")]
#[command(long_about = r#"
provisio asks for a machine image, an instance size, a region and a load
balancer name, renders them into a Terraform configuration, runs Terraform
to create the resources and then confirms through the AWS API that they exist.

WORKFLOWS:
  provision  → Ask, render, terraform init/plan/apply, validate (default)
  render     → Ask and write the Terraform configuration only
  check      → Report whether Terraform and AWS configuration are usable

AWS credentials and region are taken from the standard AWS environment
(AWS_PROFILE, AWS_ACCESS_KEY_ID, ~/.aws/config, ...).

EXIT CODES:
  0 - Success
  1 - Failure
  2 - Invalid arguments
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// YAML configuration file
    #[arg(long, global = true, env = "PROVISIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for the rendered configuration and Terraform state
    #[arg(long, global = true, env = "PROVISIO_WORKDIR")]
    pub workdir: Option<PathBuf>,

    /// Terraform executable
    #[arg(long, global = true, env = "PROVISIO_TERRAFORM_BIN")]
    pub terraform_bin: Option<String>,

    /// Where to write the validation result
    #[arg(long, global = true, env = "PROVISIO_OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,
}

impl GlobalArgs {
    /// Configuration file values with command-line overrides applied.
    pub fn load_config(&self) -> Result<ProvisioConfig> {
        let mut config = ProvisioConfig::load_or_default(self.config.as_deref())
            .context("Failed to load configuration")?;

        if let Some(workdir) = &self.workdir {
            config = config.with_working_dir(workdir);
        }
        if let Some(binary) = &self.terraform_bin {
            config = config.with_terraform_binary(binary);
        }
        if let Some(output) = &self.output_file {
            config = config.with_validation_output(output);
        }

        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect choices, provision with Terraform and validate the result
    Provision,

    /// Collect choices and write the Terraform configuration without running it
    Render(render::RenderArgs),

    /// Check that Terraform and AWS configuration are available
    Check,
}
