//! Parsing of `terraform output -json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RunnerResult;

/// One named output as reported by Terraform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputValue {
    pub value: serde_json::Value,
    #[serde(rename = "type", default)]
    pub value_type: serde_json::Value,
    #[serde(default)]
    pub sensitive: bool,
}

impl OutputValue {
    /// Value for display; sensitive values are masked.
    pub fn display(&self) -> String {
        if self.sensitive {
            return "(sensitive value)".to_string();
        }
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Output name to value, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputMapping {
    outputs: BTreeMap<String, OutputValue>,
}

impl OutputMapping {
    /// Parse the JSON document printed by `terraform output -json`.
    ///
    /// Terraform prints `{}` when there are no outputs; blank input is
    /// treated the same way.
    pub fn parse(json: &str) -> RunnerResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn get(&self, name: &str) -> Option<&OutputValue> {
        self.outputs.get(name)
    }

    /// String value of an output; `None` if absent, not a string, or empty.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.outputs
            .get(name)
            .and_then(|o| o.value.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OutputValue)> {
        self.outputs.iter()
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.outputs.insert(
            name.into(),
            OutputValue {
                value,
                value_type: serde_json::Value::Null,
                sensitive: false,
            },
        );
    }
}
