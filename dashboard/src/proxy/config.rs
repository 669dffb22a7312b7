//! Proxy configuration

use secrecy::{ExposeSecret, SecretString};

use crate::app::settings::{OctopusSettings, ENV_API_KEY, ENV_SERVER_URL, ENV_SPACE_ID};
use crate::errors::DashboardError;

/// Header carrying the Octopus API key
pub const API_KEY_HEADER: &str = "X-Octopus-ApiKey";

/// Placeholder replaced by the configured space id
pub const SPACE_ID_PLACEHOLDER: &str = "{spaceId}";

/// Credentials and target of the upstream server
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub server_url: String,
    pub api_key: SecretString,
    pub space_id: String,
    pub env_order: String,
}

impl ProxyConfig {
    /// Fail with `MissingConfig` naming every unset value
    pub fn validate(&self) -> Result<(), DashboardError> {
        let mut missing = Vec::new();
        if self.server_url.is_empty() {
            missing.push(ENV_SERVER_URL);
        }
        if self.api_key.expose_secret().is_empty() {
            missing.push(ENV_API_KEY);
        }
        if self.space_id.is_empty() {
            missing.push(ENV_SPACE_ID);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DashboardError::MissingConfig(missing))
        }
    }
}

impl From<&OctopusSettings> for ProxyConfig {
    fn from(settings: &OctopusSettings) -> Self {
        Self {
            server_url: settings.server_url.clone(),
            api_key: settings.api_key.clone(),
            space_id: settings.space_id.clone(),
            env_order: settings.env_order.clone(),
        }
    }
}
