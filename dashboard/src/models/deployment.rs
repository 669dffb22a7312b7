//! Deployment view models

use std::collections::BTreeSet;

use octopus_api::{DeploymentState, Environment, Project, Tenant};
use serde::{Deserialize, Serialize};

/// Name used when an id has no directory entry
pub const UNKNOWN_NAME: &str = "Unknown";

/// A dashboard item joined with its project, environment and tenant names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    pub project_name: String,
    pub project_id: String,
    pub environment_name: String,
    pub environment_id: String,
    pub tenant_name: String,
    pub tenant_id: String,
    pub version: String,

    /// Completion timestamp as reported upstream, empty when still running
    pub deployed_at: String,

    pub state: DeploymentState,
}

/// An (environment id, tenant id) combination
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvTenantPair {
    pub environment_id: String,
    pub tenant_id: String,
}

impl EnvTenantPair {
    pub fn new(environment_id: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            environment_id: environment_id.into(),
            tenant_id: tenant_id.into(),
        }
    }
}

/// Which environment/tenant combinations deployment targets can reach
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Feasibility {
    /// Deployment targets were unavailable; nothing may be styled as infeasible
    #[default]
    NotComputed,
    Computed {
        feasible: BTreeSet<EnvTenantPair>,
        infeasible: BTreeSet<EnvTenantPair>,
    },
}

impl Feasibility {
    pub fn is_computed(&self) -> bool {
        matches!(self, Feasibility::Computed { .. })
    }

    /// `None` when not computed, otherwise whether the pair is infeasible
    pub fn is_infeasible(&self, environment_id: &str, tenant_id: &str) -> Option<bool> {
        match self {
            Feasibility::NotComputed => None,
            Feasibility::Computed { infeasible, .. } => Some(
                infeasible.contains(&EnvTenantPair::new(environment_id, tenant_id)),
            ),
        }
    }
}

/// Everything one refresh cycle produces
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteDeploymentData {
    pub deployments: Vec<DeploymentInfo>,
    pub all_projects: Vec<Project>,
    pub all_environments: Vec<Environment>,
    pub all_tenants: Vec<Tenant>,
    pub env_order: String,
    pub feasibility: Feasibility,
}
