//! Domain types for Auto Scaling Groups and search tags.

use std::collections::BTreeMap;

use aws_sdk_autoscaling::types as sdk;
use serde::{Serialize, Serializer};

use crate::error::{FindAsgError, Result};

/// Health status reported by the Auto Scaling service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl From<&str> for HealthStatus {
    /// Anything other than an exact `Healthy` counts as unhealthy.
    fn from(s: &str) -> Self {
        if s == "Healthy" {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        }
    }
}

/// Instance lifecycle state within a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    Pending,
    InService,
    Terminating,
    /// Any other provider-defined state (e.g. `Standby`, `Terminating:Wait`).
    Other(String),
}

impl LifecycleState {
    pub fn as_str(&self) -> &str {
        match self {
            LifecycleState::Pending => "Pending",
            LifecycleState::InService => "InService",
            LifecycleState::Terminating => "Terminating",
            LifecycleState::Other(s) => s,
        }
    }
}

impl From<&str> for LifecycleState {
    fn from(s: &str) -> Self {
        match s {
            "Pending" => LifecycleState::Pending,
            "InService" => LifecycleState::InService,
            "Terminating" => LifecycleState::Terminating,
            other => LifecycleState::Other(other.to_string()),
        }
    }
}

impl Serialize for LifecycleState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Launch template reference attached to a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LaunchTemplateRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A member instance of an Auto Scaling Group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub id: String,
    pub health: HealthStatus,
    pub lifecycle: LifecycleState,
    pub launch_config_name: Option<String>,
    pub availability_zone: Option<String>,
}

impl Instance {
    /// Healthy and serving traffic.
    pub fn is_viable(&self) -> bool {
        self.health == HealthStatus::Healthy && self.lifecycle == LifecycleState::InService
    }
}

/// An Auto Scaling Group with every attribute the tool reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub min_size: i32,
    pub max_size: i32,
    pub desired_capacity: i32,
    pub default_cooldown: Option<i32>,
    pub health_check_period: Option<i32>,
    pub health_check_type: Option<String>,
    pub launch_config_name: Option<String>,
    pub launch_template: Option<LaunchTemplateRef>,
    pub placement_group: Option<String>,
    pub termination_policies: Vec<String>,
    pub availability_zones: Vec<String>,
    pub vpc_zone_identifier: Option<String>,
    pub load_balancers: Vec<String>,
    pub target_group_arns: Vec<String>,
    /// Tags in provider order, unique by key.
    pub tags: Vec<(String, String)>,
    pub instances: Vec<Instance>,
}

impl Group {
    /// Look up a tag value by key.
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn owned(s: Option<&str>) -> Option<String> {
    s.map(|s| s.to_string())
}

impl From<&sdk::Instance> for Instance {
    fn from(i: &sdk::Instance) -> Self {
        Self {
            id: i.instance_id().unwrap_or_default().to_string(),
            health: HealthStatus::from(i.health_status().unwrap_or_default()),
            lifecycle: i
                .lifecycle_state()
                .map(|s| LifecycleState::from(s.as_str()))
                .unwrap_or_else(|| LifecycleState::Other("Unknown".to_string())),
            launch_config_name: owned(i.launch_configuration_name()),
            availability_zone: owned(i.availability_zone()),
        }
    }
}

impl From<&sdk::AutoScalingGroup> for Group {
    fn from(asg: &sdk::AutoScalingGroup) -> Self {
        let mut tags: Vec<(String, String)> = Vec::with_capacity(asg.tags().len());
        for tag in asg.tags() {
            let Some(key) = tag.key() else { continue };
            if tags.iter().any(|(k, _)| k == key) {
                continue;
            }
            tags.push((key.to_string(), tag.value().unwrap_or_default().to_string()));
        }

        let launch_template = asg.launch_template().map(|lt| LaunchTemplateRef {
            id: owned(lt.launch_template_id()),
            name: owned(lt.launch_template_name()),
            version: owned(lt.version()),
        });

        Self {
            name: asg.auto_scaling_group_name().unwrap_or_default().to_string(),
            min_size: asg.min_size().unwrap_or(0),
            max_size: asg.max_size().unwrap_or(0),
            desired_capacity: asg.desired_capacity().unwrap_or(0),
            default_cooldown: asg.default_cooldown(),
            health_check_period: asg.health_check_grace_period(),
            health_check_type: owned(asg.health_check_type()),
            launch_config_name: owned(asg.launch_configuration_name()),
            launch_template,
            placement_group: owned(asg.placement_group()),
            termination_policies: asg.termination_policies().to_vec(),
            availability_zones: asg.availability_zones().to_vec(),
            vpc_zone_identifier: owned(asg.vpc_zone_identifier()).filter(|s| !s.is_empty()),
            load_balancers: asg.load_balancer_names().to_vec(),
            target_group_arns: asg.target_group_arns().to_vec(),
            tags,
            instances: asg.instances().iter().map(Instance::from).collect(),
        }
    }
}

/// Caller-supplied tags a group must carry to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTags(BTreeMap<String, String>);

impl SearchTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag; the same key with a different value is rejected.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        let value = value.into();

        if key.is_empty() {
            return Err(FindAsgError::config("tag key must not be empty"));
        }

        match self.0.get(&key) {
            Some(existing) if *existing != value => Err(FindAsgError::config(format!(
                "tag '{}' given twice with different values ('{}' and '{}')",
                key, existing, value
            ))),
            _ => {
                self.0.insert(key, value);
                Ok(())
            }
        }
    }

    /// Parse a single `KEY=VALUE` pair. The value may be empty or contain `=`.
    pub fn parse_pair(pair: &str) -> Result<(String, String)> {
        pair.split_once('=')
            .map(|(k, v)| (k.trim().to_string(), v.to_string()))
            .ok_or_else(|| {
                FindAsgError::config(format!(
                    "invalid tag '{}', expected KEY=VALUE",
                    pair
                ))
            })
    }

    /// Build from repeated `KEY=VALUE` arguments.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self> {
        let mut tags = Self::new();
        for pair in pairs {
            let (key, value) = Self::parse_pair(pair.as_ref())?;
            tags.insert(key, value)?;
        }
        Ok(tags)
    }

    /// Build from a JSON object. Scalar values are coerced to strings.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| FindAsgError::config(format!("--tags is not valid JSON: {}", e)))?;

        let serde_json::Value::Object(map) = value else {
            return Err(FindAsgError::config("--tags must be a JSON object"));
        };

        let mut tags = Self::new();
        for (key, value) in map {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                other => {
                    return Err(FindAsgError::config(format!(
                        "tag '{}' has unsupported value {}",
                        key, other
                    )));
                }
            };
            tags.insert(key, value)?;
        }
        Ok(tags)
    }

    /// Fold another tag set into this one, rejecting conflicts.
    pub fn merge(&mut self, other: SearchTags) -> Result<()> {
        for (key, value) in other.0 {
            self.insert(key, value)?;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SearchTags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}
