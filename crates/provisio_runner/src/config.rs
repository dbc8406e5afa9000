//! Terraform invocation configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::runner::Stage;

/// How the Terraform binary is invoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerraformConfig {
    /// Executable name or path
    pub binary: String,
    /// Extra environment variables for every invocation
    pub env: HashMap<String, String>,
    /// Echo `init` output to the terminal while it runs
    pub stream_init: bool,
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            binary: "terraform".to_string(),
            env: HashMap::from([("TF_IN_AUTOMATION".to_string(), "1".to_string())]),
            stream_init: true,
        }
    }
}

impl TerraformConfig {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            ..Self::default()
        }
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn stream_init(mut self, enabled: bool) -> Self {
        self.stream_init = enabled;
        self
    }

    /// Arguments for a stage.
    pub fn stage_args(stage: Stage) -> &'static [&'static str] {
        match stage {
            Stage::Init => &["init", "-input=false"],
            Stage::Plan => &["plan", "-input=false", "-no-color"],
            Stage::Apply => &["apply", "-input=false", "-auto-approve", "-no-color"],
            Stage::Output => &["output", "-json"],
        }
    }
}
