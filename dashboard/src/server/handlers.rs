//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{DashboardError, ErrorBody};
use crate::models::deployment::{DeploymentInfo, Feasibility};
use crate::server::state::ServerState;
use crate::sync::refresher::{RefreshOutcome, RefreshState, RefreshTrigger, Snapshot};
use crate::utils::version_info;
use crate::view::badge::VersionBadge;
use crate::view::filter::{DeploymentFilter, FilterOptions};
use crate::view::layout::{compute_layout, Layout};
use crate::view::sort::SortState;
use crate::view::stats::Stats;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    let version = version_info();
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "octodash".to_string(),
        version: version.version,
    })
}

/// Version handler
pub async fn version_handler() -> impl IntoResponse {
    Json(version_info())
}

/// Proxy handler: forwards `endpoint` and the remaining parameters upstream
pub async fn proxy_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, DashboardError> {
    let body = state.forwarder.forward(params).await?;
    Ok(Json(body))
}

async fn current_snapshot(state: &ServerState) -> Result<Arc<Snapshot>, DashboardError> {
    if let Some(snapshot) = state.refresher.current().await {
        return Ok(snapshot);
    }

    let refresh_state = state.refresher.get_state().await;
    let reason = refresh_state
        .last_error
        .unwrap_or_else(|| "initial refresh has not completed".to_string());
    Err(DashboardError::NotReady(reason))
}

/// Filter and sort parameters for the deployments table
#[derive(Debug, Default, Deserialize)]
pub struct DeploymentsQuery {
    pub project: Option<String>,
    pub environment: Option<String>,
    pub tenant: Option<String>,
    pub search: Option<String>,
    /// e.g. `project:asc,deployedAt:desc`
    pub sort: Option<String>,
}

impl DeploymentsQuery {
    fn filter(&self) -> DeploymentFilter {
        DeploymentFilter {
            project: self.project.clone(),
            environment: self.environment.clone(),
            tenant: self.tenant.clone(),
            search: self.search.clone(),
        }
    }

    fn sort_state(&self) -> Result<SortState, DashboardError> {
        match &self.sort {
            Some(sort) => sort.parse(),
            None => Ok(SortState::default()),
        }
    }
}

/// A table row: the deployment plus its display badge
#[derive(Debug, Serialize)]
pub struct DeploymentRow {
    #[serde(flatten)]
    pub deployment: DeploymentInfo,
    pub badge: VersionBadge,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentsResponse {
    pub generation: u64,
    pub fetched_at: DateTime<Utc>,
    pub total: usize,
    pub filtered: usize,
    pub filters_active: bool,
    pub sort: String,
    pub deployments: Vec<DeploymentRow>,
}

/// Filtered, sorted deployment rows
pub async fn deployments_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<DeploymentsQuery>,
) -> Result<Json<DeploymentsResponse>, DashboardError> {
    let sort = query.sort_state()?;
    let filter = query.filter();
    let snapshot = current_snapshot(&state).await?;

    let mut rows = filter.apply(&snapshot.data.deployments);
    sort.sort(&mut rows);

    Ok(Json(DeploymentsResponse {
        generation: snapshot.generation,
        fetched_at: snapshot.fetched_at,
        total: snapshot.data.deployments.len(),
        filtered: rows.len(),
        filters_active: filter.is_active(),
        sort: sort.to_string(),
        deployments: rows
            .into_iter()
            .map(|deployment| DeploymentRow {
                badge: VersionBadge::new(&deployment.version, &deployment.state),
                deployment,
            })
            .collect(),
    }))
}

/// Values offered by the filter dropdowns
pub async fn filters_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<FilterOptions>, DashboardError> {
    let snapshot = current_snapshot(&state).await?;
    Ok(Json(FilterOptions::from_deployments(&snapshot.data.deployments)))
}

/// Summary counters for the current filter
pub async fn stats_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<DeploymentsQuery>,
) -> Result<Json<Stats>, DashboardError> {
    let snapshot = current_snapshot(&state).await?;
    let filtered = query.filter().apply(&snapshot.data.deployments);
    Ok(Json(Stats::compute(&snapshot.data.deployments, &filtered)))
}

/// Feasible and infeasible environment/tenant pairs
pub async fn feasibility_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Feasibility>, DashboardError> {
    let snapshot = current_snapshot(&state).await?;
    Ok(Json(snapshot.data.feasibility.clone()))
}

#[derive(Debug, Default, Deserialize)]
pub struct LayoutQuery {
    pub spacing: Option<f64>,
}

/// 3D grid over the full directories
pub async fn layout_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<LayoutQuery>,
) -> Result<Json<Layout>, DashboardError> {
    let spacing = query.spacing.unwrap_or(state.layout_spacing);
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(DashboardError::InvalidQuery(format!(
            "spacing must be a positive number, got {}",
            spacing
        )));
    }

    let snapshot = current_snapshot(&state).await?;
    let data = &snapshot.data;
    let layout = compute_layout(
        &data.all_projects,
        &data.all_environments,
        &data.all_tenants,
        &data.deployments,
        &data.env_order,
        spacing,
    )
    .with_feasibility(&data.feasibility);

    Ok(Json(layout))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshStatusResponse {
    pub refreshing: bool,
    #[serde(flatten)]
    pub state: RefreshState,
}

/// Refresh progress and history
pub async fn refresh_status_handler(
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    Json(RefreshStatusResponse {
        refreshing: state.refresher.is_refreshing(),
        state: state.refresher.get_state().await,
    })
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub generation: u64,
}

/// Manual refresh
///
/// Answers 409 without starting anything when a refresh is already running.
pub async fn refresh_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Response, DashboardError> {
    let outcome = state.refresher.trigger_refresh(RefreshTrigger::Manual).await?;
    Ok(refresh_outcome_response(outcome))
}

fn refresh_outcome_response(outcome: RefreshOutcome) -> Response {
    let rejected = |status: StatusCode, error: &str| {
        (
            status,
            Json(ErrorBody {
                error: error.to_string(),
                details: None,
            }),
        )
            .into_response()
    };

    match outcome {
        RefreshOutcome::Refreshed { generation } => Json(RefreshResponse {
            success: true,
            generation,
        })
        .into_response(),
        RefreshOutcome::AlreadyRunning => {
            rejected(StatusCode::CONFLICT, "Refresh already in progress")
        }
        RefreshOutcome::CoolingDown => rejected(
            StatusCode::TOO_MANY_REQUESTS,
            "Refresh cooling down after recent failures",
        ),
    }
}
