//! Application state management

use std::sync::Arc;

use tracing::{info, warn};

use crate::app::options::AppOptions;
use crate::errors::DashboardError;
use crate::http::client::HttpClient;
use crate::http::octopus::UpstreamApi;
use crate::proxy::forward::ProxyForwarder;
use crate::services::deployments::DeploymentService;
use crate::sync::refresher::Refresher;

/// Main application state
///
/// Built once per process from `AppOptions`; nothing here is global.
pub struct AppState {
    /// Authenticated forwarder behind the proxy route
    pub forwarder: Arc<ProxyForwarder>,

    /// Snapshot owner fed by the deployment service
    pub refresher: Arc<Refresher>,
}

impl AppState {
    /// Initialize application state
    pub fn init(options: &AppOptions) -> Result<Self, DashboardError> {
        info!("Initializing application state...");

        if let Err(e) = options.proxy.validate() {
            // The proxy keeps answering with a configuration error until fixed.
            warn!("Upstream not fully configured: {}", e.details().unwrap_or_default());
        }

        let forwarder = Arc::new(ProxyForwarder::new(options.proxy.clone())?);
        let api: Arc<dyn UpstreamApi> = Arc::new(HttpClient::new(&options.proxy_url)?);

        Ok(Self::with_api(forwarder, api))
    }

    /// Assemble state around a given upstream API
    pub fn with_api(forwarder: Arc<ProxyForwarder>, api: Arc<dyn UpstreamApi>) -> Self {
        let service = DeploymentService::new(api);
        let refresher = Arc::new(Refresher::new(service));

        Self { forwarder, refresher }
    }
}
