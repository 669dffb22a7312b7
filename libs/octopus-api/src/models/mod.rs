//! API models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Project resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Environment resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Environment {
    pub id: String,
    pub name: String,
}

/// Tenant resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tenant {
    pub id: String,
    pub name: String,
}

/// Paginated collection envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total_results: u64,
}

/// Whether a dashboard item belongs to a tenant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tenancy {
    Tenanted { tenant_id: String },
    Untenanted,
}

impl Tenancy {
    pub fn tenant_id(&self) -> Option<&str> {
        match self {
            Tenancy::Tenanted { tenant_id } => Some(tenant_id),
            Tenancy::Untenanted => None,
        }
    }
}

impl From<Option<String>> for Tenancy {
    fn from(tenant_id: Option<String>) -> Self {
        match tenant_id {
            Some(tenant_id) if !tenant_id.is_empty() => Tenancy::Tenanted { tenant_id },
            _ => Tenancy::Untenanted,
        }
    }
}

/// Deployment task state as reported by the dashboard
///
/// Unknown values are carried through verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeploymentState {
    Success,
    Failed,
    Executing,
    Queued,
    Canceled,
    Cancelling,
    TimedOut,
    Other(String),
}

impl DeploymentState {
    pub fn as_str(&self) -> &str {
        match self {
            DeploymentState::Success => "Success",
            DeploymentState::Failed => "Failed",
            DeploymentState::Executing => "Executing",
            DeploymentState::Queued => "Queued",
            DeploymentState::Canceled => "Canceled",
            DeploymentState::Cancelling => "Cancelling",
            DeploymentState::TimedOut => "TimedOut",
            DeploymentState::Other(s) => s,
        }
    }

    /// Queued or executing
    pub fn is_in_progress(&self) -> bool {
        matches!(self, DeploymentState::Executing | DeploymentState::Queued)
    }
}

impl From<String> for DeploymentState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Success" => DeploymentState::Success,
            "Failed" => DeploymentState::Failed,
            "Executing" => DeploymentState::Executing,
            "Queued" => DeploymentState::Queued,
            "Canceled" => DeploymentState::Canceled,
            "Cancelling" => DeploymentState::Cancelling,
            "TimedOut" => DeploymentState::TimedOut,
            _ => DeploymentState::Other(s),
        }
    }
}

impl From<DeploymentState> for String {
    fn from(state: DeploymentState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One current or historical deployment on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDashboardItem", into = "RawDashboardItem")]
pub struct DashboardItem {
    pub id: String,
    pub project_id: String,
    pub environment_id: String,
    pub tenancy: Tenancy,
    pub release_version: String,
    pub state: DeploymentState,
    pub completed_time: Option<String>,
}

/// Wire shape of a dashboard item, with the optional `TenantId`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawDashboardItem {
    id: String,
    project_id: String,
    environment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tenant_id: Option<String>,
    #[serde(default)]
    release_version: String,
    state: DeploymentState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_time: Option<String>,
}

impl From<RawDashboardItem> for DashboardItem {
    fn from(raw: RawDashboardItem) -> Self {
        Self {
            id: raw.id,
            project_id: raw.project_id,
            environment_id: raw.environment_id,
            tenancy: Tenancy::from(raw.tenant_id),
            release_version: raw.release_version,
            state: raw.state,
            completed_time: raw.completed_time,
        }
    }
}

impl From<DashboardItem> for RawDashboardItem {
    fn from(item: DashboardItem) -> Self {
        Self {
            id: item.id,
            project_id: item.project_id,
            environment_id: item.environment_id,
            tenant_id: item.tenancy.tenant_id().map(str::to_string),
            release_version: item.release_version,
            state: item.state,
            completed_time: item.completed_time,
        }
    }
}

/// Dashboard summary: items plus the directories needed to name them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DashboardResponse {
    pub items: Vec<DashboardItem>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub environments: Vec<Environment>,
    #[serde(default)]
    pub tenants: Vec<Tenant>,
    /// Injected by the dashboard proxy, not by Octopus
    #[serde(rename = "envOrder", default, skip_serializing_if = "Option::is_none")]
    pub env_order: Option<String>,
}

/// How a deployment target takes part in tenanted deployments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenantedDeploymentParticipation {
    #[default]
    Untenanted,
    Tenanted,
    TenantedOrUntenanted,
}

impl TenantedDeploymentParticipation {
    pub fn accepts_tenants(&self) -> bool {
        matches!(
            self,
            TenantedDeploymentParticipation::Tenanted
                | TenantedDeploymentParticipation::TenantedOrUntenanted
        )
    }
}

/// Deployment target (machine) resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentTarget {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub environment_ids: Vec<String>,
    #[serde(default)]
    pub tenant_ids: Vec<String>,
    #[serde(default)]
    pub tenanted_deployment_participation: TenantedDeploymentParticipation,
}
