//! Provision command - the full interactive pipeline.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use provisio_core::InputCollector;
use provisio_iac::{AwsInventory, Pipeline};
use provisio_runner::{TerraformCli, TerraformConfig};

use super::GlobalArgs;

pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;

    println!("Build AWS infrastructure with Terraform!");
    println!("Please enter the following details to create your infrastructure.\n");

    let tool = Arc::new(TerraformCli::new(TerraformConfig::new(&config.terraform_binary)));
    let pipeline = Pipeline::new(config, tool);

    let version = pipeline
        .driver()
        .ensure_available()
        .await
        .context("Terraform is required to provision infrastructure")?;
    info!("Using {}", version);

    let stdin = io::stdin();
    let choices = InputCollector::new(stdin.lock(), io::stdout()).collect()?;

    let inventory = Arc::new(AwsInventory::with_region(&choices.region).await);
    let outcome = pipeline.run(&choices, inventory).await?;

    println!(
        "\n✅ Terraform config written to {}",
        outcome.config_path.display()
    );
    println!(
        "✅ AWS validation complete. Results saved to {}.",
        pipeline.config().validation_output.display()
    );
    println!("{}", outcome.validation.to_json()?);

    Ok(())
}
