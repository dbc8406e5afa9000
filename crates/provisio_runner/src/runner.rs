//! Provisioning tool trait and types.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RunnerResult;

/// One operation of the provisioning tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Init,
    Plan,
    Apply,
    Output,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Init => "init",
            Stage::Plan => "plan",
            Stage::Apply => "apply",
            Stage::Output => "output",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Exit code reported by the tool (-1 when killed by a signal)
    pub exit_code: i64,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
    /// Execution start time
    pub started_at: DateTime<Utc>,
    /// Execution end time
    pub finished_at: DateTime<Utc>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ToolResult {
    /// Check if execution was successful (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Get combined output (stdout + stderr).
    pub fn combined_output(&self) -> String {
        if self.stdout.is_empty() {
            self.stderr.clone()
        } else if self.stderr.is_empty() {
            self.stdout.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }

    /// Most useful text to report when the invocation failed.
    pub fn failure_detail(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.combined_output().trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Capability interface of the external provisioning tool.
///
/// Every operation runs against a working directory holding the rendered
/// configuration. Implementations report the tool's exit status and output;
/// deciding whether a non-zero status is fatal is left to the caller.
#[async_trait]
pub trait ProvisioningTool: Send + Sync {
    /// Check if the tool can be executed.
    async fn is_available(&self) -> RunnerResult<bool>;

    /// Get version information.
    async fn version(&self) -> RunnerResult<String>;

    /// Prepare the working directory (providers, backend).
    async fn init(&self, working_dir: &Path) -> RunnerResult<ToolResult>;

    /// Compute the change set.
    async fn plan(&self, working_dir: &Path) -> RunnerResult<ToolResult>;

    /// Apply the change set without interactive approval.
    async fn apply(&self, working_dir: &Path) -> RunnerResult<ToolResult>;

    /// Read outputs as JSON.
    async fn output(&self, working_dir: &Path) -> RunnerResult<ToolResult>;

    /// Run a stage by name.
    async fn run_stage(&self, stage: Stage, working_dir: &Path) -> RunnerResult<ToolResult> {
        match stage {
            Stage::Init => self.init(working_dir).await,
            Stage::Plan => self.plan(working_dir).await,
            Stage::Apply => self.apply(working_dir).await,
            Stage::Output => self.output(working_dir).await,
        }
    }
}
