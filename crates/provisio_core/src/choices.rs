//! Provisioning choice types.

use serde::{Deserialize, Serialize};

/// The only region resources may be created in.
pub const ALLOWED_REGION: &str = "us-east-1";

/// Region substituted when the user asks for anything else.
pub const FALLBACK_REGION: &str = "us-east-1";

/// Availability zone the compute instance is pinned to.
pub const DEFAULT_AVAILABILITY_ZONE: &str = "us-east-1a";

/// Machine image family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageFamily {
    Ubuntu,
    AmazonLinux,
}

impl ImageFamily {
    /// Parse user input. `linux` and `amazon linux` are aliases for Amazon Linux.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "ubuntu" => Some(Self::Ubuntu),
            "amazon-linux" | "amazon linux" | "linux" => Some(Self::AmazonLinux),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ubuntu => "ubuntu",
            Self::AmazonLinux => "amazon-linux",
        }
    }
}

impl std::fmt::Display for ImageFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compute instance size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceSize {
    #[serde(rename = "t3.small")]
    Small,
    #[serde(rename = "t3.medium")]
    Medium,
}

impl InstanceSize {
    /// Parse user input. Accepts the full type names and `small` / `medium`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "t3.small" | "small" => Some(Self::Small),
            "t3.medium" | "medium" => Some(Self::Medium),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "t3.small",
            Self::Medium => "t3.medium",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![Self::Small, Self::Medium]
    }
}

impl std::fmt::Display for InstanceSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of applying the region policy to user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionChoice {
    pub region: String,
    /// Set when the requested region was replaced by [`FALLBACK_REGION`].
    pub defaulted_from: Option<String>,
}

impl RegionChoice {
    pub fn resolve(input: &str) -> Self {
        let requested = input.trim();
        if requested == ALLOWED_REGION {
            Self {
                region: requested.to_string(),
                defaulted_from: None,
            }
        } else {
            Self {
                region: FALLBACK_REGION.to_string(),
                defaulted_from: Some(requested.to_string()),
            }
        }
    }

    pub fn was_defaulted(&self) -> bool {
        self.defaulted_from.is_some()
    }
}

/// Validated parameters for one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSet {
    pub image: ImageFamily,
    pub size: InstanceSize,
    pub region: String,
    pub availability_zone: String,
    pub load_balancer_name: String,
}

impl ChoiceSet {
    /// Build a choice set, applying the region policy.
    pub fn new(
        image: ImageFamily,
        size: InstanceSize,
        region: &str,
        load_balancer_name: impl Into<String>,
    ) -> Self {
        Self {
            image,
            size,
            region: RegionChoice::resolve(region).region,
            availability_zone: DEFAULT_AVAILABILITY_ZONE.to_string(),
            load_balancer_name: load_balancer_name.into().trim().to_string(),
        }
    }

    /// Human-readable summary, one field per line.
    pub fn summary(&self) -> String {
        format!(
            "  AMI:            {}\n  Instance Type:  {}\n  Region:         {}\n  ALB Name:       {}",
            self.image, self.size, self.region, self.load_balancer_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_family_aliases() {
        assert_eq!(ImageFamily::parse("Ubuntu"), Some(ImageFamily::Ubuntu));
        assert_eq!(ImageFamily::parse("  linux "), Some(ImageFamily::AmazonLinux));
        assert_eq!(ImageFamily::parse("Amazon Linux"), Some(ImageFamily::AmazonLinux));
        assert_eq!(ImageFamily::parse("amazon-linux"), Some(ImageFamily::AmazonLinux));
        assert_eq!(ImageFamily::parse("debian"), None);
        assert_eq!(ImageFamily::parse(""), None);
    }

    #[test]
    fn test_instance_size_parse() {
        assert_eq!(InstanceSize::parse("t3.small"), Some(InstanceSize::Small));
        assert_eq!(InstanceSize::parse("T3.MEDIUM"), Some(InstanceSize::Medium));
        assert_eq!(InstanceSize::parse("medium"), Some(InstanceSize::Medium));
        assert_eq!(InstanceSize::parse("t3.large"), None);
    }

    #[test]
    fn test_region_policy() {
        let allowed = RegionChoice::resolve("us-east-1");
        assert_eq!(allowed.region, "us-east-1");
        assert!(!allowed.was_defaulted());

        for input in ["eu-west-1", "US-EAST-1", "", "us-east-2"] {
            let choice = RegionChoice::resolve(input);
            assert_eq!(choice.region, FALLBACK_REGION);
            assert!(choice.was_defaulted());
        }
    }

    #[test]
    fn test_choice_set_never_keeps_disallowed_region() {
        let choices = ChoiceSet::new(
            ImageFamily::Ubuntu,
            InstanceSize::Small,
            "eu-west-1",
            " myalb ",
        );
        assert_eq!(choices.region, "us-east-1");
        assert_eq!(choices.load_balancer_name, "myalb");
        assert_eq!(choices.availability_zone, DEFAULT_AVAILABILITY_ZONE);
    }

    #[test]
    fn test_serde_tokens() {
        let yaml = serde_yaml::to_string(&InstanceSize::Medium).unwrap();
        assert_eq!(yaml.trim(), "t3.medium");
        let family: ImageFamily = serde_yaml::from_str("amazon-linux").unwrap();
        assert_eq!(family, ImageFamily::AmazonLinux);
    }
}
