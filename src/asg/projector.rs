//! Projection of a matched group into a flat, serializable record.

use std::collections::BTreeMap;

use serde::Serialize;

use super::types::{Group, HealthStatus, LaunchTemplateRef, LifecycleState};

/// Per-instance facts keyed by instance id in [`MatchResult::instance_facts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceFacts {
    pub health_status: HealthStatus,
    pub lifecycle_state: LifecycleState,
    pub launch_config_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
}

/// Summary of one matched Auto Scaling Group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub name: String,
    pub min_size: i32,
    pub max_size: i32,
    pub desired_capacity: i32,
    pub default_cooldown: Option<i32>,
    pub health_check_period: Option<i32>,
    pub health_check_type: Option<String>,
    pub launch_config_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_template: Option<LaunchTemplateRef>,
    pub placement_group: Option<String>,
    pub termination_policies: Vec<String>,
    pub availability_zones: Vec<String>,
    pub vpc_zone_identifier: Option<String>,
    pub load_balancers: Vec<String>,
    pub target_group_arns: Vec<String>,

    pub healthy_instances: usize,
    pub unhealthy_instances: usize,
    pub in_service_instances: usize,
    pub pending_instances: usize,
    pub terminating_instances: usize,
    pub viable_instances: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instances: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_facts: Option<BTreeMap<String, InstanceFacts>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

impl MatchResult {
    /// Number of member instances, zero when the group is empty.
    pub fn instance_count(&self) -> usize {
        self.instances.as_ref().map_or(0, Vec::len)
    }
}

/// Project a group into a [`MatchResult`], counting instance health and lifecycle
/// in a single pass. The counters are independent, not exclusive buckets.
pub fn project(group: &Group) -> MatchResult {
    let mut result = MatchResult {
        name: group.name.clone(),
        min_size: group.min_size,
        max_size: group.max_size,
        desired_capacity: group.desired_capacity,
        default_cooldown: group.default_cooldown,
        health_check_period: group.health_check_period,
        health_check_type: group.health_check_type.clone(),
        launch_config_name: group.launch_config_name.clone(),
        launch_template: group.launch_template.clone(),
        placement_group: group.placement_group.clone(),
        termination_policies: group.termination_policies.clone(),
        availability_zones: group.availability_zones.clone(),
        vpc_zone_identifier: group.vpc_zone_identifier.clone(),
        load_balancers: group.load_balancers.clone(),
        target_group_arns: group.target_group_arns.clone(),
        healthy_instances: 0,
        unhealthy_instances: 0,
        in_service_instances: 0,
        pending_instances: 0,
        terminating_instances: 0,
        viable_instances: 0,
        instances: None,
        instance_facts: None,
        tags: None,
    };

    if !group.instances.is_empty() {
        let mut ids = Vec::with_capacity(group.instances.len());
        let mut facts = BTreeMap::new();

        for instance in &group.instances {
            if instance.is_viable() {
                result.viable_instances += 1;
            }

            match instance.health {
                HealthStatus::Healthy => result.healthy_instances += 1,
                HealthStatus::Unhealthy => result.unhealthy_instances += 1,
            }

            match instance.lifecycle {
                LifecycleState::InService => result.in_service_instances += 1,
                LifecycleState::Terminating => result.terminating_instances += 1,
                LifecycleState::Pending => result.pending_instances += 1,
                LifecycleState::Other(_) => {}
            }

            ids.push(instance.id.clone());
            facts.insert(
                instance.id.clone(),
                InstanceFacts {
                    health_status: instance.health,
                    lifecycle_state: instance.lifecycle.clone(),
                    launch_config_name: instance.launch_config_name.clone(),
                    availability_zone: instance.availability_zone.clone(),
                },
            );
        }

        result.instances = Some(ids);
        result.instance_facts = Some(facts);
    }

    if !group.tags.is_empty() {
        result.tags = Some(group.tags.iter().cloned().collect());
    }

    result
}
