//! Run configuration loaded from an optional YAML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, CatalogOverrides};
use crate::error::{CoreError, CoreResult};

/// Paths, tool binary and lookup-table overrides for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisioConfig {
    /// Directory the rendered configuration is written to and Terraform runs in
    pub working_dir: PathBuf,
    /// File name of the rendered configuration inside `working_dir`
    pub config_file_name: String,
    /// Where the validation result is written
    pub validation_output: PathBuf,
    /// Terraform executable name or path
    pub terraform_binary: String,
    /// Replacement lookup tables
    pub catalog: CatalogOverrides,
}

impl Default for ProvisioConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("terraform"),
            config_file_name: "main.tf".to_string(),
            validation_output: PathBuf::from("aws_validation.json"),
            terraform_binary: "terraform".to_string(),
            catalog: CatalogOverrides::default(),
        }
    }
}

impl ProvisioConfig {
    /// Load from a YAML file. Absent fields keep their defaults.
    pub fn load(path: &Path) -> CoreResult<Self> {
        debug!("Loading configuration from {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| CoreError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_yaml(&content).map_err(|e| CoreError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> CoreResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    pub fn with_validation_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.validation_output = path.into();
        self
    }

    pub fn with_terraform_binary(mut self, binary: impl Into<String>) -> Self {
        self.terraform_binary = binary.into();
        self
    }

    /// Full path of the rendered configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.working_dir.join(&self.config_file_name)
    }

    /// Lookup tables for this run.
    pub fn build_catalog(&self) -> Catalog {
        Catalog::with_overrides(&self.catalog)
    }
}
