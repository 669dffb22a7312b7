//! Shared fixtures

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use octodash::errors::DashboardError;
use octodash::http::octopus::{ListParams, UpstreamApi};
use octodash::models::deployment::DeploymentInfo;
use octopus_api::{DeploymentState, Environment, Project, Tenant};
use serde_json::{json, Value};

pub fn project(id: &str, name: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        slug: name.to_lowercase(),
    }
}

pub fn environment(id: &str, name: &str) -> Environment {
    Environment { id: id.to_string(), name: name.to_string() }
}

pub fn tenant(id: &str, name: &str) -> Tenant {
    Tenant { id: id.to_string(), name: name.to_string() }
}

pub fn deployment(project: &str, environment: &str, tenant: &str, version: &str) -> DeploymentInfo {
    DeploymentInfo {
        project_name: project.to_string(),
        project_id: format!("Projects-{}", project),
        environment_name: environment.to_string(),
        environment_id: format!("Environments-{}", environment),
        tenant_name: tenant.to_string(),
        tenant_id: format!("Tenants-{}", tenant),
        version: version.to_string(),
        deployed_at: String::new(),
        state: DeploymentState::Success,
    }
}

pub fn deployed_at(mut deployment: DeploymentInfo, at: &str) -> DeploymentInfo {
    deployment.deployed_at = at.to_string();
    deployment
}

/// Upstream API answering from canned bodies keyed by endpoint
#[derive(Default)]
pub struct FakeApi {
    responses: HashMap<String, Result<Value, u16>>,
    pub calls: Mutex<Vec<(String, ListParams)>>,
}

impl FakeApi {
    pub fn with(mut self, endpoint: &str, body: Value) -> Self {
        self.responses.insert(endpoint.to_string(), Ok(body));
        self
    }

    pub fn failing(mut self, endpoint: &str, status: u16) -> Self {
        self.responses.insert(endpoint.to_string(), Err(status));
        self
    }

    pub fn called(&self, endpoint: &str) -> Option<ListParams> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(called, _)| called == endpoint)
            .map(|(_, params)| *params)
    }
}

#[async_trait]
impl UpstreamApi for FakeApi {
    async fn get_json(&self, endpoint: &str, params: &ListParams) -> Result<Value, DashboardError> {
        self.calls.lock().unwrap().push((endpoint.to_string(), *params));
        match self.responses.get(endpoint) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(DashboardError::Upstream {
                status: Some(*status),
                message: format!("Request failed with status code {}", status),
            }),
            None => Err(DashboardError::Upstream {
                status: Some(404),
                message: format!("no canned response for {}", endpoint),
            }),
        }
    }
}

/// A small space: two projects, Dev/Prod, two tenants, three dashboard items
pub fn sample_api() -> FakeApi {
    FakeApi::default()
        .with(
            "/api/{spaceId}/dashboard",
            json!({
                "Items": [
                    {
                        "Id": "Dashboards-1",
                        "ProjectId": "Projects-1",
                        "EnvironmentId": "Environments-1",
                        "TenantId": "Tenants-1",
                        "ReleaseVersion": "1.0.0",
                        "State": "Success",
                        "CompletedTime": "2025-03-01T10:00:00.000+00:00"
                    },
                    {
                        "Id": "Dashboards-2",
                        "ProjectId": "Projects-2",
                        "EnvironmentId": "Environments-2",
                        "TenantId": "Tenants-2",
                        "ReleaseVersion": "2.1.0.feature",
                        "State": "Executing"
                    },
                    {
                        "Id": "Dashboards-3",
                        "ProjectId": "Projects-1",
                        "EnvironmentId": "Environments-2",
                        "ReleaseVersion": "0.9.0",
                        "State": "Success"
                    }
                ],
                "Projects": [
                    { "Id": "Projects-1", "Name": "Billing", "Slug": "billing" },
                    { "Id": "Projects-2", "Name": "Api", "Slug": "api" }
                ],
                "Environments": [
                    { "Id": "Environments-1", "Name": "Dev" },
                    { "Id": "Environments-2", "Name": "Prod" }
                ],
                "Tenants": [
                    { "Id": "Tenants-1", "Name": "Acme" },
                    { "Id": "Tenants-2", "Name": "Globex" }
                ],
                "envOrder": "Prod,Dev"
            }),
        )
        .with(
            "/api/{spaceId}/projects",
            json!({
                "Items": [
                    { "Id": "Projects-1", "Name": "Billing", "Slug": "billing" },
                    { "Id": "Projects-2", "Name": "Api", "Slug": "api" },
                    { "Id": "Projects-3", "Name": "Search", "Slug": "search" }
                ],
                "TotalResults": 3
            }),
        )
        .with(
            "/api/{spaceId}/environments",
            json!({
                "Items": [
                    { "Id": "Environments-1", "Name": "Dev" },
                    { "Id": "Environments-2", "Name": "Prod" }
                ],
                "TotalResults": 2
            }),
        )
        .with(
            "/api/{spaceId}/tenants",
            json!({
                "Items": [
                    { "Id": "Tenants-1", "Name": "Acme" },
                    { "Id": "Tenants-2", "Name": "Globex" }
                ],
                "TotalResults": 2
            }),
        )
        .with(
            "/api/{spaceId}/machines",
            json!({
                "Items": [
                    {
                        "Id": "Machines-1",
                        "Name": "web-01",
                        "EnvironmentIds": ["Environments-1", "Environments-2"],
                        "TenantIds": ["Tenants-1"],
                        "TenantedDeploymentParticipation": "Tenanted"
                    },
                    {
                        "Id": "Machines-2",
                        "Name": "web-02",
                        "EnvironmentIds": ["Environments-2"],
                        "TenantIds": ["Tenants-2"],
                        "TenantedDeploymentParticipation": "Untenanted"
                    }
                ],
                "TotalResults": 2
            }),
        )
}
