//! Deployment filtering

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::deployment::DeploymentInfo;

/// Filter values; `None` or an empty string matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentFilter {
    /// Exact project name
    pub project: Option<String>,

    /// Exact environment name
    pub environment: Option<String>,

    /// Exact tenant name
    pub tenant: Option<String>,

    /// Case-insensitive substring of project, environment, tenant or version
    pub search: Option<String>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl DeploymentFilter {
    pub fn is_active(&self) -> bool {
        active(&self.project).is_some()
            || active(&self.environment).is_some()
            || active(&self.tenant).is_some()
            || active(&self.search).is_some()
    }

    pub fn matches(&self, deployment: &DeploymentInfo) -> bool {
        if let Some(project) = active(&self.project) {
            if deployment.project_name != project {
                return false;
            }
        }
        if let Some(environment) = active(&self.environment) {
            if deployment.environment_name != environment {
                return false;
            }
        }
        if let Some(tenant) = active(&self.tenant) {
            if deployment.tenant_name != tenant {
                return false;
            }
        }
        if let Some(search) = active(&self.search) {
            let needle = search.to_lowercase();
            let found = [
                &deployment.project_name,
                &deployment.environment_name,
                &deployment.tenant_name,
                &deployment.version,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }
        true
    }

    /// Matching deployments, in input order
    pub fn apply(&self, deployments: &[DeploymentInfo]) -> Vec<DeploymentInfo> {
        deployments
            .iter()
            .filter(|d| self.matches(d))
            .cloned()
            .collect()
    }
}

/// Distinct names offered by the filter dropdowns, sorted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub projects: Vec<String>,
    pub environments: Vec<String>,
    pub tenants: Vec<String>,
}

impl FilterOptions {
    pub fn from_deployments(deployments: &[DeploymentInfo]) -> Self {
        Self {
            projects: distinct(deployments, |d| &d.project_name),
            environments: distinct(deployments, |d| &d.environment_name),
            tenants: distinct(deployments, |d| &d.tenant_name),
        }
    }
}

fn distinct<F>(deployments: &[DeploymentInfo], field: F) -> Vec<String>
where
    F: Fn(&DeploymentInfo) -> &String,
{
    deployments
        .iter()
        .map(|d| field(d).clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
