//! Check command - verify the external tools provisio relies on.

use anyhow::{bail, Result};

use provisio_iac::AwsInventory;
use provisio_runner::{ProvisioningTool, TerraformCli, TerraformConfig};

use super::GlobalArgs;

pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;

    println!("🔎 Checking prerequisites...");

    let terraform = TerraformCli::new(TerraformConfig::new(&config.terraform_binary));
    let terraform_ok = terraform.is_available().await?;
    if terraform_ok {
        println!("   ✅ {}", terraform.version().await?);
    } else {
        println!("   ❌ '{}' could not be executed", config.terraform_binary);
    }

    let inventory = AwsInventory::from_env().await;
    match inventory.region() {
        Some(region) => println!("   ✅ AWS region: {}", region),
        None => println!("   ⚠️  No default AWS region configured (run `aws configure`)"),
    }

    println!("   📁 Working directory: {}", config.working_dir.display());
    println!("   📄 Validation output: {}", config.validation_output.display());

    if !terraform_ok {
        bail!("Terraform not available");
    }

    println!("\n✅ Ready to provision");
    Ok(())
}
