//! # provisio_core
//!
//! Provisioning choices and their validation for provisio.
//!
//! This crate owns everything that happens before any infrastructure text is
//! produced: the closed sets of machine image families and instance sizes,
//! the region policy, the fixed lookup tables that map those choices to AWS
//! literals, and the interactive collector that turns user answers into a
//! [`ChoiceSet`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use provisio_core::{Catalog, InputCollector};
//! use std::io;
//!
//! let stdin = io::stdin();
//! let mut collector = InputCollector::new(stdin.lock(), io::stdout());
//! let choices = collector.collect().unwrap();
//!
//! let catalog = Catalog::default();
//! println!("AMI: {}", catalog.image_id(choices.image));
//! ```

pub mod catalog;
pub mod choices;
pub mod collector;
pub mod config;
pub mod error;

pub use catalog::{Catalog, CatalogOverrides, PLACEHOLDER_IMAGE_ID, PLACEHOLDER_INSTANCE_TYPE};
pub use choices::{
    ChoiceSet, ImageFamily, InstanceSize, RegionChoice, ALLOWED_REGION, DEFAULT_AVAILABILITY_ZONE,
    FALLBACK_REGION,
};
pub use collector::InputCollector;
pub use config::ProvisioConfig;
pub use error::{CoreError, CoreResult};
