//! Template rendering.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use tracing::debug;

use provisio_core::{Catalog, ChoiceSet};

use crate::error::{TemplateError, TemplateResult};
use crate::template::MAIN_TEMPLATE;

/// Rendered Terraform configuration text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedConfig {
    text: String,
}

impl RenderedConfig {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl std::fmt::Display for RenderedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Substitutes `{{ slot }}` markers in a template.
pub struct TemplateRenderer {
    variable_pattern: Regex,
    template: String,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Renderer over the canonical template.
    pub fn new() -> Self {
        Self::with_template(MAIN_TEMPLATE)
    }

    /// Renderer over a custom template.
    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            // Match {{name}} or {{ name }}
            variable_pattern: Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*)\s*\}\}")
                .expect("slot pattern is a valid regex"),
            template: template.into(),
        }
    }

    /// Slot values for a choice set, after catalog lookup.
    pub fn variables(choices: &ChoiceSet, catalog: &Catalog) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("region".to_string(), choices.region.clone()),
            ("ami".to_string(), catalog.image_id(choices.image).to_string()),
            (
                "instance_type".to_string(),
                catalog.instance_type(choices.size).to_string(),
            ),
            (
                "availability_zone".to_string(),
                choices.availability_zone.clone(),
            ),
            (
                "load_balancer_name".to_string(),
                choices.load_balancer_name.clone(),
            ),
        ])
    }

    /// Render the template for a choice set.
    pub fn render(&self, choices: &ChoiceSet, catalog: &Catalog) -> TemplateResult<RenderedConfig> {
        let variables = Self::variables(choices, catalog);
        debug!("Rendering template with {:?}", variables);

        if let Some(missing) = self.missing_variables(&variables).into_iter().next() {
            return Err(TemplateError::MissingVariable(missing));
        }

        Ok(RenderedConfig {
            text: self.render_content(&self.template, &variables),
        })
    }

    /// Slots referenced by the template that `variables` does not provide, sorted and unique.
    pub fn missing_variables(&self, variables: &BTreeMap<String, String>) -> Vec<String> {
        self.variable_pattern
            .captures_iter(&self.template)
            .map(|caps| caps[1].to_string())
            .filter(|name| !variables.contains_key(name))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Replace every known slot in `content`; unknown slots are kept verbatim.
    pub fn render_content(&self, content: &str, variables: &BTreeMap<String, String>) -> String {
        self.variable_pattern
            .replace_all(content, |caps: &regex::Captures| {
                variables
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .to_string()
    }
}
