//! Render command - write the Terraform configuration without running it.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use provisio_core::InputCollector;
use provisio_iac::Pipeline;
use provisio_runner::{TerraformCli, TerraformConfig};

use super::GlobalArgs;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Also print the rendered configuration
    #[arg(short, long)]
    print: bool,
}

pub async fn execute(global: &GlobalArgs, args: RenderArgs) -> Result<()> {
    let config = global.load_config()?;

    let stdin = io::stdin();
    let choices = InputCollector::new(stdin.lock(), io::stdout()).collect()?;

    let tool = Arc::new(TerraformCli::new(TerraformConfig::new(&config.terraform_binary)));
    let pipeline = Pipeline::new(config, tool);

    if args.print {
        let rendered = pipeline.render(&choices)?;
        println!("\n📄 Rendered Terraform Configuration:");
        println!("{}", rendered);
    }

    let path = pipeline
        .render_to_disk(&choices)
        .context("Failed to write Terraform configuration")?;

    println!("\n✅ Terraform config written to {}", path.display());
    println!(
        "   Run `terraform -chdir={} init && terraform -chdir={} apply` to provision it.",
        pipeline.config().working_dir.display(),
        pipeline.config().working_dir.display()
    );

    Ok(())
}
