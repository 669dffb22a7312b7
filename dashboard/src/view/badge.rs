//! Version badge classification

use octopus_api::DeploymentState;
use serde::Serialize;

/// How a badge should be emphasised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BadgeStatus {
    InProgress,
    Failed,
    Success,
    Neutral,
}

impl From<&DeploymentState> for BadgeStatus {
    fn from(state: &DeploymentState) -> Self {
        match state {
            DeploymentState::Executing | DeploymentState::Queued => BadgeStatus::InProgress,
            DeploymentState::Failed => BadgeStatus::Failed,
            DeploymentState::Success => BadgeStatus::Success,
            _ => BadgeStatus::Neutral,
        }
    }
}

/// A release version split for display
///
/// Versions with four or more dot separated parts are development builds:
/// the first three parts are the main version and the rest is build info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionBadge {
    pub main: String,
    pub build: Option<String>,
    pub status: BadgeStatus,
}

impl VersionBadge {
    pub fn new(version: &str, state: &DeploymentState) -> Self {
        let parts: Vec<&str> = version.split('.').collect();
        let (main, build) = if parts.len() >= 4 {
            (parts[..3].join("."), Some(parts[3..].join(".")))
        } else {
            (version.to_string(), None)
        };

        Self {
            main,
            build,
            status: BadgeStatus::from(state),
        }
    }
}
