//! # provisio_templates
//!
//! Terraform configuration rendering for provisio.
//!
//! One canonical template describes the whole stack: a VPC with two public
//! subnets, a security group, a single EC2 web server and an application
//! load balancer forwarding HTTP traffic to it. Rendering substitutes the
//! values of a [`provisio_core::ChoiceSet`] into the template's `{{ slot }}`
//! markers; [`ConfigWriter`] then puts the result on disk.
//!
//! ## Example
//!
//! ```rust,no_run
//! use provisio_core::{Catalog, ChoiceSet, ImageFamily, InstanceSize};
//! use provisio_templates::{ConfigWriter, TemplateRenderer};
//! use std::path::Path;
//!
//! let choices = ChoiceSet::new(ImageFamily::Ubuntu, InstanceSize::Small, "us-east-1", "myalb");
//! let rendered = TemplateRenderer::new()
//!     .render(&choices, &Catalog::default())
//!     .unwrap();
//!
//! ConfigWriter::write(rendered.as_str(), Path::new("terraform/main.tf")).unwrap();
//! ```

pub mod error;
pub mod renderer;
pub mod template;
pub mod writer;

pub use error::{TemplateError, TemplateResult};
pub use renderer::{RenderedConfig, TemplateRenderer};
pub use template::{MAIN_TEMPLATE, OUTPUT_INSTANCE_ID, OUTPUT_LOAD_BALANCER_DNS};
pub use writer::ConfigWriter;
