//! End-to-end provisioning pipeline.
//!
//! choices → render → write → init/plan/apply → outputs → validation.
//! Each step runs only after the previous one succeeded; the first error
//! ends the run.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use provisio_core::{Catalog, ChoiceSet, ProvisioConfig};
use provisio_runner::{OutputMapping, ProvisioningTool};
use provisio_templates::{ConfigWriter, RenderedConfig, TemplateRenderer};

use crate::driver::{ProvisionReport, ProvisioningDriver};
use crate::error::IacResult;
use crate::inventory::CloudInventory;
use crate::validator::{ResourceValidator, ValidationResult};

/// Everything a successful run produced.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub config_path: PathBuf,
    pub report: ProvisionReport,
    pub outputs: OutputMapping,
    pub validation: ValidationResult,
}

/// Wires the renderer, writer, driver and validator together.
pub struct Pipeline {
    config: ProvisioConfig,
    catalog: Catalog,
    renderer: TemplateRenderer,
    driver: ProvisioningDriver,
}

impl Pipeline {
    pub fn new(config: ProvisioConfig, tool: Arc<dyn ProvisioningTool>) -> Self {
        let catalog = config.build_catalog();
        Self {
            config,
            catalog,
            renderer: TemplateRenderer::new(),
            driver: ProvisioningDriver::new(tool),
        }
    }

    /// Suppress stage banners and tool output.
    pub fn quiet(mut self) -> Self {
        self.driver = self.driver.quiet();
        self
    }

    pub fn config(&self) -> &ProvisioConfig {
        &self.config
    }

    pub fn driver(&self) -> &ProvisioningDriver {
        &self.driver
    }

    /// Render the configuration for `choices` without touching the filesystem.
    pub fn render(&self, choices: &ChoiceSet) -> IacResult<RenderedConfig> {
        Ok(self.renderer.render(choices, &self.catalog)?)
    }

    /// Render and write the configuration; returns the file path.
    pub fn render_to_disk(&self, choices: &ChoiceSet) -> IacResult<PathBuf> {
        let rendered = self.render(choices)?;
        let path = self.config.config_path();
        ConfigWriter::write(rendered.as_str(), &path)?;
        Ok(path)
    }

    /// Run every step for `choices`, validating against `inventory`.
    pub async fn run(
        &self,
        choices: &ChoiceSet,
        inventory: Arc<dyn CloudInventory>,
    ) -> IacResult<PipelineOutcome> {
        info!("Starting provisioning run for load balancer '{}'", choices.load_balancer_name);

        let config_path = self.render_to_disk(choices)?;

        let working_dir = &self.config.working_dir;
        let report = self.driver.provision(working_dir).await?;
        let outputs = self.driver.read_outputs(working_dir).await?;

        let validation = ResourceValidator::new(inventory)
            .validate_and_save(&outputs, &self.config.validation_output)
            .await?;

        info!("Provisioning run complete in {}ms", report.total_duration_ms());

        Ok(PipelineOutcome {
            config_path,
            report,
            outputs,
            validation,
        })
    }
}
