//! Cross-checks Terraform outputs against live cloud resources.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use provisio_runner::OutputMapping;
use provisio_templates::{OUTPUT_INSTANCE_ID, OUTPUT_LOAD_BALANCER_DNS};

use crate::error::{IacError, IacResult};
use crate::inventory::{CloudInventory, LoadBalancerSummary};

/// Confirmed state of the provisioned resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub instance_id: String,
    pub instance_state: String,
    pub public_ip: Option<String>,
    pub load_balancer_dns: String,
}

impl ValidationResult {
    /// Pretty JSON with 4-space indentation.
    pub fn to_json(&self) -> IacResult<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write to `path`, replacing any previous result.
    pub fn write_to(&self, path: &Path) -> IacResult<()> {
        fs::write(path, self.to_json()?)?;
        info!("Validation result written to {:?}", path);
        Ok(())
    }
}

/// Validates resources named by Terraform outputs.
pub struct ResourceValidator {
    inventory: Arc<dyn CloudInventory>,
}

impl ResourceValidator {
    pub fn new(inventory: Arc<dyn CloudInventory>) -> Self {
        Self { inventory }
    }

    /// Look up the instance and load balancer named in `outputs`.
    pub async fn validate(&self, outputs: &OutputMapping) -> IacResult<ValidationResult> {
        let instance_id = outputs
            .get_str(OUTPUT_INSTANCE_ID)
            .ok_or_else(|| IacError::MissingOutput(OUTPUT_INSTANCE_ID.to_string()))?;
        let dns_name = outputs
            .get_str(OUTPUT_LOAD_BALANCER_DNS)
            .ok_or_else(|| IacError::MissingOutput(OUTPUT_LOAD_BALANCER_DNS.to_string()))?;

        let instance = self
            .inventory
            .describe_instance(instance_id)
            .await?
            .ok_or_else(|| IacError::InstanceNotFound(instance_id.to_string()))?;

        info!("🔍 Validating ALB DNS: {}", dns_name);
        let load_balancers = self.inventory.list_load_balancers().await?;
        if find_by_dns(&load_balancers, dns_name).is_none() {
            return Err(IacError::LoadBalancerNotFound(dns_name.to_string()));
        }

        Ok(ValidationResult {
            instance_id: instance_id.to_string(),
            instance_state: instance.state,
            public_ip: instance.public_ip,
            load_balancer_dns: dns_name.to_string(),
        })
    }

    /// Validate, then persist the result. Nothing is written if validation fails.
    pub async fn validate_and_save(
        &self,
        outputs: &OutputMapping,
        path: &Path,
    ) -> IacResult<ValidationResult> {
        let result = self.validate(outputs).await?;
        result.write_to(path)?;
        Ok(result)
    }
}

/// First load balancer whose DNS name equals `dns_name` exactly.
pub fn find_by_dns<'a>(
    load_balancers: &'a [LoadBalancerSummary],
    dns_name: &str,
) -> Option<&'a LoadBalancerSummary> {
    load_balancers
        .iter()
        .find(|lb| lb.dns_name.as_deref() == Some(dns_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{InstanceDetails, MockCloudInventory};
    use mockall::predicate::eq;
    use tempfile::tempdir;

    const DNS: &str = "myalb-1234567890.us-east-1.elb.amazonaws.com";

    fn outputs(instance_id: Option<&str>, dns: Option<&str>) -> OutputMapping {
        let mut outputs = OutputMapping::default();
        if let Some(id) = instance_id {
            outputs.insert(OUTPUT_INSTANCE_ID, serde_json::json!(id));
        }
        if let Some(dns) = dns {
            outputs.insert(OUTPUT_LOAD_BALANCER_DNS, serde_json::json!(dns));
        }
        outputs
    }

    fn lb(name: &str, dns: &str) -> LoadBalancerSummary {
        LoadBalancerSummary {
            name: Some(name.to_string()),
            dns_name: Some(dns.to_string()),
            arn: Some(format!("arn:aws:elasticloadbalancing:us-east-1:123:loadbalancer/app/{}", name)),
        }
    }

    fn running_instance() -> InstanceDetails {
        InstanceDetails {
            instance_id: "i-0abc".to_string(),
            state: "running".to_string(),
            public_ip: Some("54.1.2.3".to_string()),
        }
    }

    #[tokio::test]
    async fn test_validate_success() {
        let mut inventory = MockCloudInventory::new();
        inventory
            .expect_describe_instance()
            .with(eq("i-0abc"))
            .times(1)
            .returning(|_| Ok(Some(running_instance())));
        inventory
            .expect_list_load_balancers()
            .times(1)
            .returning(|| Ok(vec![lb("other", "other.elb.amazonaws.com"), lb("myalb", DNS)]));

        let validator = ResourceValidator::new(Arc::new(inventory));
        let result = validator.validate(&outputs(Some("i-0abc"), Some(DNS))).await.unwrap();

        assert_eq!(result.instance_id, "i-0abc");
        assert_eq!(result.instance_state, "running");
        assert_eq!(result.public_ip.as_deref(), Some("54.1.2.3"));
        assert_eq!(result.load_balancer_dns, DNS);
    }

    #[tokio::test]
    async fn test_missing_instance_id_makes_no_api_calls() {
        let mut inventory = MockCloudInventory::new();
        inventory.expect_describe_instance().never();
        inventory.expect_list_load_balancers().never();

        let validator = ResourceValidator::new(Arc::new(inventory));
        let result = validator.validate(&outputs(None, Some(DNS))).await;

        match result {
            Err(IacError::MissingOutput(name)) => assert_eq!(name, OUTPUT_INSTANCE_ID),
            other => panic!("expected MissingOutput, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_instance_not_found() {
        let mut inventory = MockCloudInventory::new();
        inventory.expect_describe_instance().returning(|_| Ok(None));
        inventory.expect_list_load_balancers().never();

        let validator = ResourceValidator::new(Arc::new(inventory));
        let result = validator.validate(&outputs(Some("i-gone"), Some(DNS))).await;
        assert!(matches!(result, Err(IacError::InstanceNotFound(_))));
    }

    #[tokio::test]
    async fn test_load_balancer_not_found_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aws_validation.json");

        let mut inventory = MockCloudInventory::new();
        inventory
            .expect_describe_instance()
            .returning(|_| Ok(Some(running_instance())));
        inventory
            .expect_list_load_balancers()
            .returning(|| Ok(vec![lb("other", "other.elb.amazonaws.com")]));

        let validator = ResourceValidator::new(Arc::new(inventory));
        let result = validator
            .validate_and_save(&outputs(Some("i-0abc"), Some(DNS)), &path)
            .await;

        assert!(matches!(result, Err(IacError::LoadBalancerNotFound(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_find_by_dns_first_match_wins() {
        let lbs = vec![lb("first", DNS), lb("second", DNS)];
        assert_eq!(find_by_dns(&lbs, DNS).unwrap().name.as_deref(), Some("first"));
        assert!(find_by_dns(&lbs, "MYALB-1234567890.us-east-1.elb.amazonaws.com").is_none());
    }

    #[test]
    fn test_result_json_uses_four_space_indent() {
        let result = ValidationResult {
            instance_id: "i-0abc".to_string(),
            instance_state: "running".to_string(),
            public_ip: None,
            load_balancer_dns: DNS.to_string(),
        };
        let json = result.to_json().unwrap();

        assert!(json.contains("\n    \"instance_id\": \"i-0abc\""));
        assert!(json.contains("\"public_ip\": null"));

        let parsed: ValidationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
