//! Summary counters

use std::collections::HashSet;

use octopus_api::DeploymentState;
use serde::Serialize;

use crate::models::deployment::DeploymentInfo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Rows left after filtering
    pub displayed: usize,
    pub total_deployments: usize,
    pub total_projects: usize,
    pub total_environments: usize,
    pub total_tenants: usize,
    pub in_progress: usize,
    pub failed: usize,
}

impl Stats {
    /// Totals count distinct ids over all deployments, not just the filtered ones
    pub fn compute(deployments: &[DeploymentInfo], filtered: &[DeploymentInfo]) -> Self {
        Self {
            displayed: filtered.len(),
            total_deployments: deployments.len(),
            total_projects: distinct(deployments, |d| d.project_id.as_str()),
            total_environments: distinct(deployments, |d| d.environment_id.as_str()),
            total_tenants: distinct(deployments, |d| d.tenant_id.as_str()),
            in_progress: deployments.iter().filter(|d| d.state.is_in_progress()).count(),
            failed: deployments
                .iter()
                .filter(|d| d.state == DeploymentState::Failed)
                .count(),
        }
    }
}

fn distinct<F>(deployments: &[DeploymentInfo], field: F) -> usize
where
    F: Fn(&DeploymentInfo) -> &str,
{
    deployments.iter().map(field).collect::<HashSet<_>>().len()
}
