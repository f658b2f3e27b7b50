//! AWS Auto Scaling SDK client wrapper.

use std::time::Duration;

use aws_sdk_autoscaling::Client;
use aws_sdk_autoscaling::error::{DisplayErrorContext, ProvideErrorMetadata};
use tracing::debug;

use super::types::Group;
use crate::config::Config;
use crate::error::{FindAsgError, Result};

/// Page size requested from `DescribeAutoScalingGroups` (the API maximum).
const PAGE_SIZE: i32 = 100;

/// Source of Auto Scaling Groups for one region.
pub trait GroupSource {
    /// Return every group visible to the caller, unfiltered.
    async fn fetch_groups(&self) -> Result<Vec<Group>>;
}

/// Auto Scaling client bound to a single region.
#[derive(Clone)]
pub struct AsgClient {
    client: Client,
    region: String,
    timeout: Option<Duration>,
}

impl AsgClient {
    /// Resolve credentials and region from the config and the ambient SDK chain.
    pub async fn new(config: &Config) -> Result<Self> {
        let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(profile) = &config.profile {
            debug!("Using AWS profile: {}", profile);
            config_loader = config_loader.profile_name(profile);
        }

        if let Some(region) = &config.region {
            debug!("Using AWS region: {}", region);
            config_loader = config_loader.region(aws_config::Region::new(region.clone()));
        }

        if let Some(endpoint) = &config.endpoint_url {
            debug!("Using endpoint override: {}", endpoint);
            config_loader = config_loader.endpoint_url(endpoint);
        }

        let sdk_config = config_loader.load().await;
        let region = sdk_config.region().map(|r| r.to_string()).ok_or_else(|| {
            FindAsgError::config(
                "AWS region not configured: pass --region or set AWS_REGION/EC2_REGION",
            )
        })?;

        Ok(Self {
            client: Client::new(&sdk_config),
            region,
            timeout: config.timeout,
        })
    }

    /// Wrap an already configured SDK client.
    #[cfg(test)]
    pub fn from_client(client: Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
            timeout: None,
        }
    }

    /// Set a deadline for the whole listing.
    #[cfg(test)]
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// Get the AWS region string.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// List every group, following `NextToken` until the last page.
    async fn describe_all(&self) -> Result<Vec<Group>> {
        debug!("Listing Auto Scaling Groups in region: {}", self.region);

        let mut groups = Vec::new();
        let mut next_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut request = self
                .client
                .describe_auto_scaling_groups()
                .max_records(PAGE_SIZE);

            if let Some(token) = next_token.take() {
                request = request.next_token(token);
            }

            let response = request.send().await.map_err(|e| {
                // Service errors carry a message; transport and credential
                // failures only describe themselves through the source chain.
                let message = e
                    .message()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| DisplayErrorContext(&e).to_string());
                FindAsgError::classify(module_path!(), e.code(), message)
            })?;

            pages += 1;
            groups.extend(response.auto_scaling_groups().iter().map(Group::from));

            next_token = response.next_token().map(|s| s.to_string());
            if next_token.is_none() {
                break;
            }
        }

        debug!("Fetched {} groups across {} page(s)", groups.len(), pages);
        Ok(groups)
    }
}

impl GroupSource for AsgClient {
    async fn fetch_groups(&self) -> Result<Vec<Group>> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.describe_all())
                .await
                .map_err(|_| FindAsgError::timeout(module_path!(), limit))?,
            None => self.describe_all().await,
        }
    }
}
