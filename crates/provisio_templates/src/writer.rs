//! Writing rendered configuration to disk.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{TemplateError, TemplateResult};

/// Writer for rendered configuration files.
pub struct ConfigWriter;

impl ConfigWriter {
    /// Write `content` to `path`, creating parent directories and replacing any existing file.
    pub fn write(content: &str, path: &Path) -> TemplateResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            debug!("Ensuring directory {:?}", parent);
            fs::create_dir_all(parent).map_err(|source| TemplateError::CreateDirFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, content).map_err(|source| TemplateError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Terraform config written to {:?}", path);
        Ok(())
    }
}
