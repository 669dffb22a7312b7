//! Environment-sourced settings

use std::path::PathBuf;

use secrecy::SecretString;
use tracing::warn;

use crate::errors::DashboardError;
use crate::logs::LogLevel;

pub const ENV_SERVER_URL: &str = "OCTOPUS_SERVER_URL";
pub const ENV_API_KEY: &str = "OCTOPUS_API_KEY";
pub const ENV_SPACE_ID: &str = "OCTOPUS_SPACE_ID";
pub const ENV_ENV_ORDER: &str = "ENV_ORDER";
pub const ENV_HOST: &str = "OCTODASH_HOST";
pub const ENV_PORT: &str = "OCTODASH_PORT";
pub const ENV_PROXY_URL: &str = "OCTODASH_PROXY_URL";
pub const ENV_POLL_INTERVAL: &str = "OCTODASH_POLL_INTERVAL_SECS";
pub const ENV_ENABLE_POLLER: &str = "OCTODASH_ENABLE_POLLER";
pub const ENV_LOG_LEVEL: &str = "OCTODASH_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "OCTODASH_LOG_JSON";
pub const ENV_LOG_DIR: &str = "OCTODASH_LOG_DIR";

/// Dashboard settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub log_level: LogLevel,
    pub log_json: bool,
    pub log_dir: Option<PathBuf>,

    /// Address the dashboard server binds to
    pub host: String,
    pub port: u16,

    /// Where the upstream client sends its requests; defaults to our own proxy route
    pub proxy_url: Option<String>,

    pub enable_poller: bool,
    pub polling_interval_secs: u64,

    pub octopus: OctopusSettings,
}

/// Upstream Octopus Deploy settings
///
/// Empty values are kept as-is; the proxy reports them per request.
#[derive(Debug, Clone)]
pub struct OctopusSettings {
    pub server_url: String,
    pub api_key: SecretString,
    pub space_id: String,
    /// Comma separated environment names, highest precedence first
    pub env_order: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_json: false,
            log_dir: None,
            host: "127.0.0.1".to_string(),
            port: 3000,
            proxy_url: None,
            enable_poller: true,
            polling_interval_secs: 60,
            octopus: OctopusSettings {
                server_url: String::new(),
                api_key: SecretString::from(String::new()),
                space_id: String::new(),
                env_order: String::new(),
            },
        }
    }
}

impl Settings {
    /// Read settings from the process environment, loading `.env` first if present
    pub fn from_env() -> Result<Self, DashboardError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!("Unable to load .env file: {}", e);
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DashboardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string());

        let log_level = match get(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
            Some(level) => level.parse()?,
            None => defaults.log_level,
        };

        let port = match get(ENV_PORT).filter(|v| !v.is_empty()) {
            Some(port) => port
                .parse()
                .map_err(|_| DashboardError::ConfigError(format!("Invalid {}: {}", ENV_PORT, port)))?,
            None => defaults.port,
        };

        let polling_interval_secs = match get(ENV_POLL_INTERVAL).filter(|v| !v.is_empty()) {
            Some(secs) => secs.parse().map_err(|_| {
                DashboardError::ConfigError(format!("Invalid {}: {}", ENV_POLL_INTERVAL, secs))
            })?,
            None => defaults.polling_interval_secs,
        };

        Ok(Self {
            log_level,
            log_json: get(ENV_LOG_JSON).map(|v| parse_flag(&v)).unwrap_or(defaults.log_json),
            log_dir: get(ENV_LOG_DIR).filter(|v| !v.is_empty()).map(PathBuf::from),
            host: get(ENV_HOST).filter(|v| !v.is_empty()).unwrap_or(defaults.host),
            port,
            proxy_url: get(ENV_PROXY_URL).filter(|v| !v.is_empty()),
            enable_poller: get(ENV_ENABLE_POLLER)
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.enable_poller),
            polling_interval_secs,
            octopus: OctopusSettings {
                server_url: get(ENV_SERVER_URL)
                    .unwrap_or_default()
                    .trim_end_matches('/')
                    .to_string(),
                api_key: SecretString::from(get(ENV_API_KEY).unwrap_or_default()),
                space_id: get(ENV_SPACE_ID).unwrap_or_default(),
                env_order: get(ENV_ENV_ORDER).unwrap_or_default(),
            },
        })
    }

    /// URL of the proxy route the upstream client calls
    pub fn resolved_proxy_url(&self) -> String {
        match &self.proxy_url {
            Some(url) => url.clone(),
            None => {
                let host = if self.host == "0.0.0.0" { "127.0.0.1" } else { &self.host };
                format!("http://{}:{}/api/octopus", host, self.port)
            }
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
