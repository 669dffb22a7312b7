//! Application configuration options

use std::time::Duration;

use crate::app::settings::Settings;
use crate::proxy::config::ProxyConfig;
use crate::view::layout::DEFAULT_SPACING;
use crate::workers::poller;

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Lifecycle configuration
    pub lifecycle: LifecycleOptions,

    /// Upstream credentials held by the proxy route
    pub proxy: ProxyConfig,

    /// URL the upstream client calls (the proxy route)
    pub proxy_url: String,

    /// Server configuration
    pub server: ServerOptions,

    /// Enable polling worker
    pub enable_poller: bool,

    /// Poller worker options
    pub poller: poller::Options,

    /// Default distance between 3D grid nodes
    pub layout_spacing: f64,
}

impl AppOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            lifecycle: LifecycleOptions::default(),
            proxy: ProxyConfig::from(&settings.octopus),
            proxy_url: settings.resolved_proxy_url(),
            server: ServerOptions {
                host: settings.host.clone(),
                port: settings.port,
            },
            enable_poller: settings.enable_poller,
            poller: poller::Options {
                interval: Duration::from_secs(settings.polling_interval_secs.max(1)),
                ..Default::default()
            },
            layout_spacing: DEFAULT_SPACING,
        }
    }
}

/// Lifecycle options for the service
#[derive(Debug, Clone)]
pub struct LifecycleOptions {
    /// Maximum delay for graceful shutdown
    pub max_shutdown_delay: Duration,
}

impl Default for LifecycleOptions {
    fn default() -> Self {
        Self {
            max_shutdown_delay: Duration::from_secs(30),
        }
    }
}

/// HTTP server options
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}
