//! Deployment data service

use std::collections::HashMap;
use std::sync::Arc;

use octopus_api::{
    DashboardResponse, DeploymentTarget, Environment, Paginated, Project, Tenancy, Tenant,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::errors::DashboardError;
use crate::http::octopus::{space_path, ListParams, UpstreamApi};
use crate::models::deployment::{CompleteDeploymentData, DeploymentInfo, UNKNOWN_NAME};
use crate::services::feasibility::compute_feasibility;

/// Fetches upstream resources and shapes them into deployment records
#[derive(Clone)]
pub struct DeploymentService {
    api: Arc<dyn UpstreamApi>,
}

impl DeploymentService {
    pub fn new(api: Arc<dyn UpstreamApi>) -> Self {
        Self { api }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &ListParams,
    ) -> Result<T, DashboardError> {
        let body = self.api.get_json(&space_path(resource), params).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn list<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, DashboardError> {
        let page: Paginated<T> = self.get(resource, &ListParams::full_page()).await?;
        debug!("Fetched {} {} (total {})", page.items.len(), resource, page.total_results);
        Ok(page.items)
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, DashboardError> {
        self.list("projects").await
    }

    pub async fn list_environments(&self) -> Result<Vec<Environment>, DashboardError> {
        self.list("environments").await
    }

    pub async fn list_tenants(&self) -> Result<Vec<Tenant>, DashboardError> {
        self.list("tenants").await
    }

    /// List deployment targets, or an empty list if they cannot be read
    ///
    /// An empty result means feasibility is unknown, not that nothing is feasible.
    pub async fn list_deployment_targets(&self) -> Vec<DeploymentTarget> {
        match self.list("machines").await {
            Ok(targets) => targets,
            Err(e) => {
                warn!("Unable to fetch deployment targets: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get_dashboard(&self) -> Result<DashboardResponse, DashboardError> {
        self.get("dashboard", &ListParams::default()).await
    }

    /// Dashboard deployments joined with their names
    pub async fn get_deployment_info(&self) -> Result<Vec<DeploymentInfo>, DashboardError> {
        let dashboard = self.get_dashboard().await?;
        Ok(join_deployments(&dashboard))
    }

    /// Dashboard, full directories and feasibility, fetched concurrently
    pub async fn get_complete_deployment_data(
        &self,
    ) -> Result<CompleteDeploymentData, DashboardError> {
        let (dashboard, all_projects, all_environments, all_tenants, targets) = tokio::try_join!(
            self.get_dashboard(),
            self.list_projects(),
            self.list_environments(),
            self.list_tenants(),
            async { Ok::<_, DashboardError>(self.list_deployment_targets().await) },
        )?;

        let deployments = join_deployments(&dashboard);
        let feasibility = compute_feasibility(&targets, &all_environments, &all_tenants);

        info!(
            "Loaded {} deployments across {} projects, {} environments, {} tenants ({} targets)",
            deployments.len(),
            all_projects.len(),
            all_environments.len(),
            all_tenants.len(),
            targets.len()
        );

        Ok(CompleteDeploymentData {
            deployments,
            all_projects,
            all_environments,
            all_tenants,
            env_order: dashboard.env_order.unwrap_or_default(),
            feasibility,
        })
    }
}

/// Join dashboard items with the dashboard's own directories
///
/// Untenanted items are dropped. Ids missing from a directory resolve to
/// `"Unknown"`.
pub fn join_deployments(dashboard: &DashboardResponse) -> Vec<DeploymentInfo> {
    let projects: HashMap<&str, &str> = dashboard
        .projects
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();
    let environments: HashMap<&str, &str> = dashboard
        .environments
        .iter()
        .map(|e| (e.id.as_str(), e.name.as_str()))
        .collect();
    let tenants: HashMap<&str, &str> = dashboard
        .tenants
        .iter()
        .map(|t| (t.id.as_str(), t.name.as_str()))
        .collect();

    let name = |map: &HashMap<&str, &str>, id: &str| {
        map.get(id).copied().unwrap_or(UNKNOWN_NAME).to_string()
    };

    dashboard
        .items
        .iter()
        .filter_map(|item| match &item.tenancy {
            Tenancy::Tenanted { tenant_id } => Some(DeploymentInfo {
                project_name: name(&projects, &item.project_id),
                project_id: item.project_id.clone(),
                environment_name: name(&environments, &item.environment_id),
                environment_id: item.environment_id.clone(),
                tenant_name: name(&tenants, tenant_id),
                tenant_id: tenant_id.clone(),
                version: item.release_version.clone(),
                deployed_at: item.completed_time.clone().unwrap_or_default(),
                state: item.state.clone(),
            }),
            Tenancy::Untenanted => None,
        })
        .collect()
}
