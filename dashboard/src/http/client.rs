//! HTTP client implementation

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};
use url::Url;

use crate::errors::{DashboardError, ErrorBody};
use crate::proxy::request::ENDPOINT_PARAM;

/// HTTP client for upstream reads
///
/// Every request goes to the dashboard's own proxy route; the upstream path
/// travels in the `endpoint` parameter and authentication is left to the proxy.
pub struct HttpClient {
    client: Client,
    proxy_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client targeting the given proxy route
    pub fn new(proxy_url: &str) -> Result<Self, DashboardError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            proxy_url: Url::parse(proxy_url)?,
        })
    }

    /// Make a GET request for `endpoint` through the proxy
    pub async fn get<T, Q>(&self, endpoint: &str, params: &Q) -> Result<T, DashboardError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        debug!("GET {} via {}", endpoint, self.proxy_url);

        let response = self
            .client
            .get(self.proxy_url.clone())
            .query(&[(ENDPOINT_PARAM, endpoint)])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("HTTP GET {} failed: {} - {}", endpoint, status, body);

            let message = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => parsed.details.unwrap_or(parsed.error),
                Err(_) => body,
            };
            return Err(DashboardError::Upstream {
                status: Some(status.as_u16()),
                message,
            });
        }

        let body = response.json().await?;
        Ok(body)
    }
}
