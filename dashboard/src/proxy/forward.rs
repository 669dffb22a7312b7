//! Forwarding of resolved requests to the upstream server

use std::time::Duration;

use reqwest::{header, Client};
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::errors::DashboardError;
use crate::proxy::config::{ProxyConfig, API_KEY_HEADER};
use crate::proxy::request::ProxyRequest;

/// Field added to every proxied body
pub const ENV_ORDER_FIELD: &str = "envOrder";

/// Authenticated forwarder to Octopus Deploy
pub struct ProxyForwarder {
    client: Client,
    config: ProxyConfig,
}

impl ProxyForwarder {
    pub fn new(config: ProxyConfig) -> Result<Self, DashboardError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client, config })
    }

    /// Forward the inbound query and return the upstream body with `envOrder` merged in
    pub async fn forward(&self, params: Vec<(String, String)>) -> Result<Value, DashboardError> {
        let request = ProxyRequest::resolve(params, &self.config)?;

        match self.send(&request).await {
            Ok(body) => Ok(with_env_order(body, &self.config.env_order)),
            Err(e) => {
                error!("Octopus API Error: {} ({})", e.details().unwrap_or_default(), request.path);
                Err(e)
            }
        }
    }

    async fn send(&self, request: &ProxyRequest) -> Result<Value, DashboardError> {
        let url = request.url(&self.config.server_url)?;
        debug!("GET {} (proxied)", request.path);

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(DashboardError::upstream)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Upstream {
                status: Some(status.as_u16()),
                message: format!("Request failed with status code {}", status.as_u16()),
            });
        }

        response.json().await.map_err(DashboardError::upstream)
    }
}

/// Merge the environment order into a proxied body
///
/// Non-object bodies are wrapped as `{ "data": <body> }` so the field has a home.
pub fn with_env_order(body: Value, env_order: &str) -> Value {
    let mut object = match body {
        Value::Object(object) => object,
        other => {
            let mut object = Map::new();
            object.insert("data".to_string(), other);
            object
        }
    };
    object.insert(ENV_ORDER_FIELD.to_string(), Value::String(env_order.to_string()));
    Value::Object(object)
}
