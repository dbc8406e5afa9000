//! Mock provisioning tool for testing.
//!
//! Provides a scripted implementation of the ProvisioningTool trait so the
//! stage ordering and fail-fast behavior of callers can be verified without
//! a Terraform binary or cloud credentials.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::error::{RunnerError, RunnerResult};
use crate::runner::{ProvisioningTool, Stage, ToolResult};

/// Predefined response for one stage.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub exit_code: i64,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl MockResponse {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
            duration_ms: 100,
        }
    }

    pub fn failure(exit_code: i64, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
            duration_ms: 100,
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }
}

/// Captured call information for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedCall {
    pub method: String,
    pub working_dir: Option<PathBuf>,
}

/// Mock provisioning tool.
///
/// Stages without a scripted response succeed with empty output, except
/// `output` which returns an empty JSON object.
#[derive(Clone)]
pub struct MockTool {
    available: Arc<RwLock<bool>>,
    version: Arc<RwLock<String>>,
    responses: Arc<RwLock<HashMap<Stage, MockResponse>>>,
    captured_calls: Arc<RwLock<Vec<CapturedCall>>>,
    /// Stages that fail to start at all.
    spawn_failures: Arc<RwLock<HashMap<Stage, String>>>,
}

impl Default for MockTool {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTool {
    pub fn new() -> Self {
        Self {
            available: Arc::new(RwLock::new(true)),
            version: Arc::new(RwLock::new("Terraform v1.6.0 (mock)".to_string())),
            responses: Arc::new(RwLock::new(HashMap::new())),
            captured_calls: Arc::new(RwLock::new(Vec::new())),
            spawn_failures: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn set_available(self, available: bool) -> Self {
        *self.available.write() = available;
        self
    }

    pub fn set_version(self, version: impl Into<String>) -> Self {
        *self.version.write() = version.into();
        self
    }

    /// Script the response of a stage.
    pub fn respond(self, stage: Stage, response: MockResponse) -> Self {
        self.responses.write().insert(stage, response);
        self
    }

    /// Script `output` to return the given JSON document.
    pub fn with_outputs_json(self, json: impl Into<String>) -> Self {
        self.respond(Stage::Output, MockResponse::success(json))
    }

    /// Make a stage fail before producing any result.
    pub fn fail_to_spawn(self, stage: Stage, message: impl Into<String>) -> Self {
        self.spawn_failures.write().insert(stage, message.into());
        self
    }

    pub fn get_calls(&self) -> Vec<CapturedCall> {
        self.captured_calls.read().clone()
    }

    pub fn call_count(&self) -> usize {
        self.captured_calls.read().len()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.captured_calls
            .read()
            .iter()
            .any(|c| c.method == method)
    }

    /// Names of the stages invoked, in call order.
    pub fn stage_sequence(&self) -> Vec<String> {
        self.captured_calls
            .read()
            .iter()
            .filter(|c| c.working_dir.is_some())
            .map(|c| c.method.clone())
            .collect()
    }

    fn record_call(&self, method: &str, working_dir: Option<&Path>) {
        self.captured_calls.write().push(CapturedCall {
            method: method.to_string(),
            working_dir: working_dir.map(Path::to_path_buf),
        });
    }

    fn respond_to(&self, stage: Stage, working_dir: &Path) -> RunnerResult<ToolResult> {
        self.record_call(stage.as_str(), Some(working_dir));

        if let Some(message) = self.spawn_failures.read().get(&stage) {
            return Err(RunnerError::ExecutionFailed(message.clone()));
        }

        let response = self
            .responses
            .read()
            .get(&stage)
            .cloned()
            .unwrap_or_else(|| match stage {
                Stage::Output => MockResponse::success("{}"),
                _ => MockResponse::success(""),
            });

        let started_at = Utc::now();
        let finished_at = started_at + chrono::Duration::milliseconds(response.duration_ms as i64);

        Ok(ToolResult {
            exit_code: response.exit_code,
            stdout: response.stdout,
            stderr: response.stderr,
            started_at,
            finished_at,
            duration_ms: response.duration_ms,
        })
    }
}

#[async_trait]
impl ProvisioningTool for MockTool {
    async fn is_available(&self) -> RunnerResult<bool> {
        self.record_call("is_available", None);
        Ok(*self.available.read())
    }

    async fn version(&self) -> RunnerResult<String> {
        self.record_call("version", None);
        if !*self.available.read() {
            return Err(RunnerError::ToolNotAvailable("mock tool disabled".to_string()));
        }
        Ok(self.version.read().clone())
    }

    async fn init(&self, working_dir: &Path) -> RunnerResult<ToolResult> {
        self.respond_to(Stage::Init, working_dir)
    }

    async fn plan(&self, working_dir: &Path) -> RunnerResult<ToolResult> {
        self.respond_to(Stage::Plan, working_dir)
    }

    async fn apply(&self, working_dir: &Path) -> RunnerResult<ToolResult> {
        self.respond_to(Stage::Apply, working_dir)
    }

    async fn output(&self, working_dir: &Path) -> RunnerResult<ToolResult> {
        self.respond_to(Stage::Output, working_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_tool_defaults() {
        let tool = MockTool::new();
        let dir = Path::new("/tmp/tf");

        assert!(tool.init(dir).await.unwrap().success());
        assert_eq!(tool.output(dir).await.unwrap().stdout, "{}");
        assert_eq!(tool.stage_sequence(), vec!["init", "output"]);
    }

    #[tokio::test]
    async fn test_mock_tool_scripted_failure() {
        let tool = MockTool::new().respond(Stage::Plan, MockResponse::failure(1, "bad plan"));
        let result = tool.run_stage(Stage::Plan, Path::new("tf")).await.unwrap();

        assert_eq!(result.exit_code, 1);
        assert_eq!(result.stderr, "bad plan");
    }

    #[tokio::test]
    async fn test_mock_tool_captures_working_dir() {
        let tool = MockTool::new();
        tool.apply(Path::new("infra")).await.unwrap();

        let calls = tool.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "apply");
        assert_eq!(calls[0].working_dir.as_deref(), Some(Path::new("infra")));
    }

    #[tokio::test]
    async fn test_mock_tool_spawn_failure() {
        let tool = MockTool::new().fail_to_spawn(Stage::Init, "no binary");
        assert!(tool.init(Path::new("tf")).await.is_err());
        assert!(tool.was_called("init"));
    }

    #[tokio::test]
    async fn test_mock_tool_availability() {
        let tool = MockTool::new().set_available(false);
        assert!(!tool.is_available().await.unwrap());
        assert!(tool.version().await.is_err());
        assert_eq!(tool.call_count(), 2);
        assert!(tool.stage_sequence().is_empty());
    }
}
