//! Integration tests for the provisioning pipeline.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use provisio_core::{InputCollector, ProvisioConfig};
use provisio_iac::{
    CloudInventory, IacError, IacResult, InstanceDetails, LoadBalancerSummary, Pipeline,
    ProvisioningDriver,
};
use provisio_runner::{MockResponse, MockTool, Stage};
use tempfile::tempdir;

/// Inventory answering from fixed data.
struct StaticInventory {
    instance: Option<InstanceDetails>,
    load_balancers: Vec<LoadBalancerSummary>,
}

#[async_trait]
impl CloudInventory for StaticInventory {
    async fn describe_instance(&self, _instance_id: &str) -> IacResult<Option<InstanceDetails>> {
        Ok(self.instance.clone())
    }

    async fn list_load_balancers(&self) -> IacResult<Vec<LoadBalancerSummary>> {
        Ok(self.load_balancers.clone())
    }
}

fn outputs_json(instance_id: &str, dns: &str) -> String {
    serde_json::json!({
        "instance_id": {"sensitive": false, "type": "string", "value": instance_id},
        "load_balancer_dns": {"sensitive": false, "type": "string", "value": dns},
    })
    .to_string()
}

#[tokio::test]
async fn test_init_failure_never_plans() {
    let tool = MockTool::new().respond(Stage::Init, MockResponse::failure(1, "backend error"));
    let driver = ProvisioningDriver::new(Arc::new(tool.clone())).quiet();

    let result = driver.provision(Path::new("terraform")).await;

    assert!(matches!(result, Err(IacError::InitFailed(_))));
    assert!(!tool.was_called("plan"));
    assert!(!tool.was_called("apply"));
}

#[tokio::test]
async fn test_plan_failure_never_applies() {
    let tool = MockTool::new().respond(Stage::Plan, MockResponse::failure(1, "bad config"));
    let driver = ProvisioningDriver::new(Arc::new(tool.clone())).quiet();

    let result = driver.provision(Path::new("terraform")).await;

    assert!(matches!(result, Err(IacError::PlanFailed(_))));
    assert_eq!(tool.stage_sequence(), vec!["init", "plan"]);
}

#[tokio::test]
async fn test_apply_failure_carries_error_text() {
    let tool = MockTool::new().respond(
        Stage::Apply,
        MockResponse::failure(1, "Error: creating ELBv2 Load Balancer: DuplicateLoadBalancerName"),
    );
    let driver = ProvisioningDriver::new(Arc::new(tool)).quiet();

    let err = driver.provision(Path::new("terraform")).await.unwrap_err();
    assert!(err.to_string().contains("DuplicateLoadBalancerName"));
}

#[tokio::test]
async fn test_interactive_answers_to_validation_file() {
    let dir = tempdir().unwrap();
    let config = ProvisioConfig::default()
        .with_working_dir(dir.path().join("terraform"))
        .with_validation_output(dir.path().join("aws_validation.json"));

    let mut collector = InputCollector::new(
        Cursor::new("ubuntu\nt3.small\neu-west-1\nmyalb\n"),
        Vec::new(),
    );
    let choices = collector.collect().unwrap();
    assert_eq!(choices.region, "us-east-1");

    let dns = "myalb-99.us-east-1.elb.amazonaws.com";
    let tool = MockTool::new().with_outputs_json(outputs_json("i-0feedface", dns));
    let inventory = StaticInventory {
        instance: Some(InstanceDetails {
            instance_id: "i-0feedface".to_string(),
            state: "pending".to_string(),
            public_ip: None,
        }),
        load_balancers: vec![LoadBalancerSummary {
            name: Some("myalb".to_string()),
            dns_name: Some(dns.to_string()),
            arn: None,
        }],
    };

    let pipeline = Pipeline::new(config.clone(), Arc::new(tool)).quiet();
    let outcome = pipeline.run(&choices, Arc::new(inventory)).await.unwrap();

    let rendered = fs::read_to_string(config.config_path()).unwrap();
    assert!(rendered.contains(r#"region = "us-east-1""#));
    assert!(!rendered.contains("eu-west-1"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config.validation_output).unwrap()).unwrap();
    assert_eq!(saved["instance_id"], "i-0feedface");
    assert_eq!(saved["instance_state"], "pending");
    assert_eq!(saved["public_ip"], serde_json::Value::Null);
    assert_eq!(saved["load_balancer_dns"], dns);
    assert_eq!(saved.as_object().unwrap().len(), 4);
    assert_eq!(outcome.outputs.len(), 2);
}

#[tokio::test]
async fn test_validation_overwrites_previous_result() {
    let dir = tempdir().unwrap();
    let config = ProvisioConfig::default()
        .with_working_dir(dir.path().join("terraform"))
        .with_validation_output(dir.path().join("aws_validation.json"));
    fs::write(&config.validation_output, "stale content that is much longer than json").unwrap();

    let dns = "a.elb.amazonaws.com";
    let tool = MockTool::new().with_outputs_json(outputs_json("i-1", dns));
    let inventory = StaticInventory {
        instance: Some(InstanceDetails {
            instance_id: "i-1".to_string(),
            state: "running".to_string(),
            public_ip: Some("1.2.3.4".to_string()),
        }),
        load_balancers: vec![LoadBalancerSummary {
            name: None,
            dns_name: Some(dns.to_string()),
            arn: None,
        }],
    };

    let choices = provisio_core::ChoiceSet::new(
        provisio_core::ImageFamily::AmazonLinux,
        provisio_core::InstanceSize::Medium,
        "us-east-1",
        "web",
    );
    Pipeline::new(config.clone(), Arc::new(tool))
        .quiet()
        .run(&choices, Arc::new(inventory))
        .await
        .unwrap();

    let content = fs::read_to_string(&config.validation_output).unwrap();
    assert!(!content.contains("stale"));
    let saved: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(saved["public_ip"], "1.2.3.4");
}
