//! Fixed lookup tables mapping choices to AWS literals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::choices::{ImageFamily, InstanceSize};

/// Substituted when an image family has no entry in the catalog.
pub const PLACEHOLDER_IMAGE_ID: &str = "ami-?????";

/// Substituted when an instance size has no entry in the catalog.
pub const PLACEHOLDER_INSTANCE_TYPE: &str = "t3.small";

/// Optional replacement tables, as read from the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOverrides {
    pub images: Option<BTreeMap<String, String>>,
    pub instance_types: Option<BTreeMap<String, String>>,
}

/// Immutable lookup tables, built once at startup.
///
/// A missing key does not fail: the lookup falls back to a placeholder
/// literal and logs a warning. The rendered configuration will then be
/// rejected by AWS rather than by this program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    images: BTreeMap<String, String>,
    instance_types: BTreeMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        let images = BTreeMap::from([
            (ImageFamily::Ubuntu.as_str().to_string(), "ami-0abcdef1234567890".to_string()),
            (ImageFamily::AmazonLinux.as_str().to_string(), "ami-0fedcba9876543210".to_string()),
        ]);

        let instance_types = InstanceSize::all()
            .into_iter()
            .map(|size| (size.as_str().to_string(), size.as_str().to_string()))
            .collect();

        Self {
            images,
            instance_types,
        }
    }
}

impl Catalog {
    /// Build a catalog from explicit tables.
    pub fn new(
        images: BTreeMap<String, String>,
        instance_types: BTreeMap<String, String>,
    ) -> Self {
        Self {
            images,
            instance_types,
        }
    }

    /// Built-in tables with any configured table replaced wholesale.
    pub fn with_overrides(overrides: &CatalogOverrides) -> Self {
        let mut catalog = Self::default();
        if let Some(images) = &overrides.images {
            catalog.images = images.clone();
        }
        if let Some(instance_types) = &overrides.instance_types {
            catalog.instance_types = instance_types.clone();
        }
        catalog
    }

    /// AMI id for an image family, or [`PLACEHOLDER_IMAGE_ID`].
    pub fn image_id(&self, family: ImageFamily) -> &str {
        match self.images.get(family.as_str()) {
            Some(id) => id,
            None => {
                warn!(
                    "No image id configured for '{}', using placeholder {}",
                    family, PLACEHOLDER_IMAGE_ID
                );
                PLACEHOLDER_IMAGE_ID
            }
        }
    }

    /// Instance type literal for a size, or [`PLACEHOLDER_INSTANCE_TYPE`].
    pub fn instance_type(&self, size: InstanceSize) -> &str {
        match self.instance_types.get(size.as_str()) {
            Some(literal) => literal,
            None => {
                warn!(
                    "No instance type configured for '{}', using placeholder {}",
                    size, PLACEHOLDER_INSTANCE_TYPE
                );
                PLACEHOLDER_INSTANCE_TYPE
            }
        }
    }
}
