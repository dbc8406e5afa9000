//! Interactive collection of provisioning choices.
//!
//! Answers are read one line at a time. An unrecognized image family or
//! instance size stops collection immediately; a disallowed region is
//! replaced by the fallback region with a warning and collection goes on.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::choices::{ChoiceSet, ImageFamily, InstanceSize, RegionChoice};
use crate::error::{CoreError, CoreResult};

const IMAGE_PROMPT: &str = "Choose between Ubuntu or Amazon Linux: ";
const SIZE_PROMPT: &str = "Choose instance type (t3.small / t3.medium): ";
const REGION_PROMPT: &str = "Select region (only 'us-east-1' is allowed, others will be defaulted): ";
const ALB_PROMPT: &str = "Enter a name for your Load Balancer (ALB): ";

/// Reads choices from `input`, writing prompts and warnings to `output`.
pub struct InputCollector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InputCollector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prompt for all four values and build a [`ChoiceSet`].
    pub fn collect(&mut self) -> CoreResult<ChoiceSet> {
        let raw_image = self.ask(IMAGE_PROMPT, "image family")?;
        let image =
            ImageFamily::parse(&raw_image).ok_or(CoreError::InvalidImageFamily(raw_image))?;
        debug!("Image family: {}", image);

        let raw_size = self.ask(SIZE_PROMPT, "instance type")?;
        let size =
            InstanceSize::parse(&raw_size).ok_or(CoreError::InvalidInstanceSize(raw_size))?;
        debug!("Instance size: {}", size);

        let raw_region = self.ask(REGION_PROMPT, "region")?;
        let region = RegionChoice::resolve(&raw_region);
        if let Some(requested) = &region.defaulted_from {
            warn!("Region '{}' is not allowed, defaulting to {}", requested, region.region);
            writeln!(
                self.output,
                "⚠️ Region '{}' is not allowed. Defaulting to '{}'.",
                requested, region.region
            )?;
        }

        let load_balancer_name = self.ask(ALB_PROMPT, "load balancer name")?;

        let choices = ChoiceSet::new(image, size, &region.region, load_balancer_name);

        writeln!(self.output, "\n✅ Summary of your configuration:")?;
        writeln!(self.output, "{}", choices.summary())?;
        self.output.flush()?;

        Ok(choices)
    }

    /// Write a prompt and read one trimmed line.
    fn ask(&mut self, prompt: &str, field: &'static str) -> CoreResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CoreError::InputClosed(field));
        }
        Ok(line.trim().to_string())
    }

    /// Give back the output sink, e.g. to inspect what was written.
    pub fn into_output(self) -> W {
        self.output
    }
}
