//! Provisioning driver: init, plan and apply with fail-fast semantics.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info};

use provisio_runner::{OutputMapping, ProvisioningTool, Stage, ToolResult};

use crate::error::{IacError, IacResult};

/// Drives the provisioning tool through its stages.
///
/// Every stage gets a single attempt. A non-zero exit status ends the run
/// with an error carrying the tool's error text; later stages are never
/// started. There is no rollback: whatever the tool already created stays.
pub struct ProvisioningDriver {
    tool: Arc<dyn ProvisioningTool>,
    echo: bool,
}

impl ProvisioningDriver {
    pub fn new(tool: Arc<dyn ProvisioningTool>) -> Self {
        Self { tool, echo: true }
    }

    /// Do not print stage banners and tool output to stdout.
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    /// Fail unless the tool can be executed; returns its version line.
    pub async fn ensure_available(&self) -> IacResult<String> {
        if !self.tool.is_available().await? {
            return Err(IacError::TerraformNotAvailable(
                "terraform binary could not be executed".to_string(),
            ));
        }
        let version = self.tool.version().await?;
        debug!("Using {}", version);
        Ok(version)
    }

    /// Run init, plan and apply in order against `working_dir`.
    pub async fn provision(&self, working_dir: &Path) -> IacResult<ProvisionReport> {
        let mut report = ProvisionReport::new();

        for (stage, banner) in [
            (Stage::Init, "🔧 terraform init"),
            (Stage::Plan, "📝 terraform plan"),
            (Stage::Apply, "🚀 terraform apply"),
        ] {
            self.say(&format!("\n{}", banner));
            let result = self.tool.run_stage(stage, working_dir).await?;

            // init output was already streamed live by the tool
            if stage != Stage::Init && !result.stdout.is_empty() {
                self.say(result.stdout.trim_end());
            }

            if !result.success() {
                error!("{} failed with exit code {}", stage, result.exit_code);
                return Err(Self::stage_error(stage, &result));
            }

            info!("{} succeeded", stage);
            report.record(stage, result);
        }

        Ok(report)
    }

    /// Read the tool's outputs after a successful apply.
    ///
    /// Unlike a best-effort read, a failure here is returned to the caller,
    /// which decides whether to abort.
    pub async fn read_outputs(&self, working_dir: &Path) -> IacResult<OutputMapping> {
        self.say("\n📦 terraform output");
        let result = self.tool.output(working_dir).await?;
        if !result.success() {
            return Err(Self::stage_error(Stage::Output, &result));
        }

        let outputs = OutputMapping::parse(&result.stdout)?;
        for (name, value) in outputs.iter() {
            self.say(&format!("{}: {}", name, value.display()));
        }
        debug!("Read {} outputs", outputs.len());

        Ok(outputs)
    }

    fn stage_error(stage: Stage, result: &ToolResult) -> IacError {
        let detail = result.failure_detail();
        match stage {
            Stage::Init => IacError::InitFailed(detail),
            Stage::Plan => IacError::PlanFailed(detail),
            Stage::Apply => IacError::ApplyFailed(detail),
            Stage::Output => IacError::OutputFailed(detail),
        }
    }

    fn say(&self, line: &str) {
        if self.echo {
            println!("{}", line);
        }
    }
}

/// Stages that ran, in order, with their results.
#[derive(Debug, Default)]
pub struct ProvisionReport {
    pub stages: Vec<StageOutcome>,
}

impl ProvisionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stage: Stage, result: ToolResult) {
        self.stages.push(StageOutcome { stage, result });
    }

    pub fn ran(&self, stage: Stage) -> bool {
        self.stages.iter().any(|s| s.stage == stage)
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.stages.iter().map(|s| s.result.duration_ms).sum()
    }
}

#[derive(Debug)]
pub struct StageOutcome {
    pub stage: Stage,
    pub result: ToolResult,
}
