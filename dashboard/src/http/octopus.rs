//! Octopus Deploy read API

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::errors::DashboardError;
use crate::http::client::HttpClient;

/// Page size large enough to return a whole collection in one call
pub const FULL_PAGE: u32 = 1000;

/// Query options understood by Octopus list endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListParams {
    /// Maximum number of items in the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take: Option<u32>,

    /// Number of items to skip before the page starts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
}

impl ListParams {
    /// A single page holding the full collection
    pub fn full_page() -> Self {
        Self {
            take: Some(FULL_PAGE),
            skip: None,
        }
    }
}

/// Space-scoped upstream path; the proxy fills in the space id
pub fn space_path(resource: &str) -> String {
    format!("/api/{{spaceId}}/{}", resource)
}

/// Read access to the upstream API
///
/// Implemented by `HttpClient`; tests substitute canned responses.
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    /// Fetch the JSON body of `endpoint`
    async fn get_json(&self, endpoint: &str, params: &ListParams) -> Result<Value, DashboardError>;
}

#[async_trait]
impl UpstreamApi for HttpClient {
    async fn get_json(&self, endpoint: &str, params: &ListParams) -> Result<Value, DashboardError> {
        self.get(endpoint, params).await
    }
}
