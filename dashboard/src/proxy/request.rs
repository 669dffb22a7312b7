//! Upstream request shaping

use url::Url;

use crate::errors::DashboardError;
use crate::proxy::config::{ProxyConfig, SPACE_ID_PLACEHOLDER};

/// Query parameter naming the upstream path
pub const ENDPOINT_PARAM: &str = "endpoint";

/// A fully resolved upstream request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRequest {
    /// Upstream path with the space id substituted
    pub path: String,
    /// Parameters forwarded verbatim, in inbound order, without `endpoint`
    pub query: Vec<(String, String)>,
}

impl ProxyRequest {
    /// Turn inbound query parameters into an upstream request
    ///
    /// Checks run in order: `endpoint` present, then configuration complete.
    pub fn resolve(
        params: Vec<(String, String)>,
        config: &ProxyConfig,
    ) -> Result<Self, DashboardError> {
        let endpoint = params
            .iter()
            .find(|(key, _)| key == ENDPOINT_PARAM)
            .map(|(_, value)| value.clone())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| DashboardError::MissingParameter("Endpoint".to_string()))?;

        config.validate()?;

        let path = endpoint.replacen(SPACE_ID_PLACEHOLDER, &config.space_id, 1);
        let query = params
            .into_iter()
            .filter(|(key, _)| key != ENDPOINT_PARAM)
            .collect();

        Ok(Self { path, query })
    }

    /// Absolute upstream URL including the forwarded query
    pub fn url(&self, server_url: &str) -> Result<Url, DashboardError> {
        let mut url = Url::parse(&format!("{}{}", server_url.trim_end_matches('/'), self.path))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }
}
