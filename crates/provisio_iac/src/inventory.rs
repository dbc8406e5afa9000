//! Read-only view of live cloud resources.

use async_trait::async_trait;
use aws_sdk_ec2::config::Region;
use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[cfg(test)]
use mockall::automock;

use crate::error::{IacError, IacResult};

/// EC2 error code for an id that does not exist.
const INSTANCE_NOT_FOUND_CODE: &str = "InvalidInstanceID.NotFound";

/// Live state of one compute instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceDetails {
    pub instance_id: String,
    pub state: String,
    pub public_ip: Option<String>,
}

/// One load balancer as listed by the cloud API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerSummary {
    pub name: Option<String>,
    pub dns_name: Option<String>,
    pub arn: Option<String>,
}

/// Cloud API queries used to confirm provisioned resources.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CloudInventory: Send + Sync {
    /// Look up an instance by id. `None` when the API knows no such instance.
    async fn describe_instance(&self, instance_id: &str) -> IacResult<Option<InstanceDetails>>;

    /// All load balancers visible to the caller, unfiltered.
    async fn list_load_balancers(&self) -> IacResult<Vec<LoadBalancerSummary>>;
}

/// AWS implementation backed by the EC2 and ELBv2 APIs.
///
/// Credentials come from the standard AWS discovery chain (environment,
/// shared config files, instance profile).
pub struct AwsInventory {
    ec2: aws_sdk_ec2::Client,
    elb: aws_sdk_elasticloadbalancingv2::Client,
    region: Option<String>,
}

impl AwsInventory {
    /// Use the region and credentials found in the environment.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::from_config(&config)
    }

    /// Use the environment's credentials against an explicit region.
    pub async fn with_region(region: impl Into<String>) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.into()))
            .load()
            .await;
        Self::from_config(&config)
    }

    pub fn from_config(config: &aws_config::SdkConfig) -> Self {
        Self {
            ec2: aws_sdk_ec2::Client::new(config),
            elb: aws_sdk_elasticloadbalancingv2::Client::new(config),
            region: config.region().map(|r| r.as_ref().to_string()),
        }
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

#[async_trait]
impl CloudInventory for AwsInventory {
    async fn describe_instance(&self, instance_id: &str) -> IacResult<Option<InstanceDetails>> {
        info!("🔍 Validating EC2 instance: {}", instance_id);

        let response = match self
            .ec2
            .describe_instances()
            .instance_ids(instance_id)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                if e.as_service_error().and_then(|se| se.code()) == Some(INSTANCE_NOT_FOUND_CODE) {
                    return Ok(None);
                }
                return Err(IacError::CloudProvider(format!(
                    "DescribeInstances failed: {}",
                    DisplayErrorContext(&e)
                )));
            }
        };

        let instance = response
            .reservations()
            .first()
            .and_then(|reservation| reservation.instances().first());

        Ok(instance.map(|instance| InstanceDetails {
            instance_id: instance
                .instance_id()
                .unwrap_or(instance_id)
                .to_string(),
            state: instance
                .state()
                .and_then(|s| s.name())
                .map(|name| name.as_str().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            public_ip: instance.public_ip_address().map(str::to_string),
        }))
    }

    async fn list_load_balancers(&self) -> IacResult<Vec<LoadBalancerSummary>> {
        let mut load_balancers = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let response = self
                .elb
                .describe_load_balancers()
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|e| {
                    IacError::CloudProvider(format!(
                        "DescribeLoadBalancers failed: {}",
                        aws_sdk_elasticloadbalancingv2::error::DisplayErrorContext(&e)
                    ))
                })?;

            load_balancers.extend(response.load_balancers().iter().map(|lb| {
                LoadBalancerSummary {
                    name: lb.load_balancer_name().map(str::to_string),
                    dns_name: lb.dns_name().map(str::to_string),
                    arn: lb.load_balancer_arn().map(str::to_string),
                }
            }));

            match response.next_marker() {
                Some(next) if !next.is_empty() => marker = Some(next.to_string()),
                _ => break,
            }
        }

        debug!("Listed {} load balancers", load_balancers.len());
        Ok(load_balancers)
    }
}
