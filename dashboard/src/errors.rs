//! Error types for the dashboard service

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the dashboard service
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    /// A required request parameter was not supplied
    #[error("{0} parameter is required")]
    MissingParameter(String),

    /// Upstream server URL, API key or space id is unset
    #[error("Octopus Deploy configuration is missing")]
    MissingConfig(Vec<&'static str>),

    /// The upstream call failed; `status` is the upstream status when there was one
    #[error("Failed to fetch from Octopus Deploy")]
    Upstream { status: Option<u16>, message: String },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Deployment data not ready: {0}")]
    NotReady(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Shutdown error: {0}")]
    ShutdownError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::MissingParameter(_) | DashboardError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            DashboardError::Upstream { status, .. } => status
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            DashboardError::HttpError(e) => e
                .status()
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            DashboardError::NotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Extra context rendered as `details` in error bodies
    pub fn details(&self) -> Option<String> {
        match self {
            DashboardError::MissingParameter(_) => None,
            DashboardError::MissingConfig(missing) => {
                Some(format!("unset: {}", missing.join(", ")))
            }
            DashboardError::Upstream { message, .. } => Some(message.clone()),
            DashboardError::HttpError(e) => Some(e.to_string()),
            DashboardError::NotReady(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    /// Build an upstream failure from a reqwest error, keeping its status if any
    pub fn upstream(err: reqwest::Error) -> Self {
        DashboardError::Upstream {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// JSON error body: `{ "error": ..., "details": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&DashboardError> for ErrorBody {
    fn from(err: &DashboardError) -> Self {
        Self {
            error: err.to_string(),
            details: err.details(),
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from(&self))).into_response()
    }
}
