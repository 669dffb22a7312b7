//! Deployment snapshot refresh

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};

use crate::errors::DashboardError;
use crate::models::deployment::CompleteDeploymentData;
use crate::services::deployments::DeploymentService;
use crate::utils::{calc_exp_backoff, CooldownOptions};

/// Immutable result of one successful refresh
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub generation: u64,
    pub fetched_at: DateTime<Utc>,
    pub data: CompleteDeploymentData,
}

/// What started a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Timer driven; honours the error cooldown
    Poll,
    /// User driven; ignores the error cooldown
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed { generation: u64 },
    /// Another refresh was in flight; nothing was started
    AlreadyRunning,
    /// Skipped because recent failures put polling in cooldown
    CoolingDown,
}

/// Refresh bookkeeping
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshState {
    pub last_attempted_at: Option<DateTime<Utc>>,
    pub last_refreshed_at: Option<DateTime<Utc>>,
    pub cooldown_ends_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub err_streak: u32,
    pub generation: u64,
}

impl RefreshState {
    pub fn is_in_cooldown(&self) -> bool {
        self.cooldown_ends_at.is_some_and(|ends_at| Utc::now() < ends_at)
    }
}

/// Owns the current snapshot and runs at most one refresh at a time
///
/// A refresh requested while another is in flight is not queued and does not
/// cancel the running one, so results are always applied in start order.
pub struct Refresher {
    service: DeploymentService,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    state: RwLock<RefreshState>,
    running: Mutex<()>,
    cooldown_options: CooldownOptions,
}

impl Refresher {
    pub fn new(service: DeploymentService) -> Self {
        Self::with_cooldown(service, CooldownOptions::default())
    }

    pub fn with_cooldown(service: DeploymentService, cooldown_options: CooldownOptions) -> Self {
        Self {
            service,
            snapshot: RwLock::new(None),
            state: RwLock::new(RefreshState::default()),
            running: Mutex::new(()),
            cooldown_options,
        }
    }

    /// Trigger a refresh
    pub async fn trigger_refresh(
        &self,
        trigger: RefreshTrigger,
    ) -> Result<RefreshOutcome, DashboardError> {
        let Ok(_guard) = self.running.try_lock() else {
            debug!("Refresh already in flight, skipping {:?} trigger", trigger);
            return Ok(RefreshOutcome::AlreadyRunning);
        };

        {
            let mut state = self.state.write().await;
            if trigger == RefreshTrigger::Poll && state.is_in_cooldown() {
                debug!("Refresh in cooldown, skipping...");
                return Ok(RefreshOutcome::CoolingDown);
            }
            state.last_attempted_at = Some(Utc::now());
        }

        let result = self.service.get_complete_deployment_data().await;

        let mut state = self.state.write().await;
        match result {
            Ok(data) => {
                let now = Utc::now();
                state.generation += 1;
                state.last_refreshed_at = Some(now);
                state.last_error = None;
                state.err_streak = 0;
                state.cooldown_ends_at = None;

                let snapshot = Snapshot {
                    generation: state.generation,
                    fetched_at: now,
                    data,
                };
                *self.snapshot.write().await = Some(Arc::new(snapshot));

                info!("Refresh {} completed ({:?})", state.generation, trigger);
                Ok(RefreshOutcome::Refreshed { generation: state.generation })
            }
            Err(e) => {
                state.err_streak += 1;
                state.last_error = Some(match e.details() {
                    Some(details) => format!("{}: {}", e, details),
                    None => e.to_string(),
                });

                let cooldown = calc_exp_backoff(&self.cooldown_options, state.err_streak);
                let cooldown_ends_at = chrono::Duration::from_std(cooldown)
                    .ok()
                    .and_then(|cooldown| Utc::now().checked_add_signed(cooldown));
                state.cooldown_ends_at = cooldown_ends_at;

                error!(
                    "Refresh failed (attempt {}), cooldown until {:?}: {}",
                    state.err_streak,
                    state.cooldown_ends_at,
                    state.last_error.as_deref().unwrap_or_default()
                );
                Err(e)
            }
        }
    }

    /// Latest successful snapshot, if any
    pub async fn current(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.read().await.clone()
    }

    pub async fn get_state(&self) -> RefreshState {
        self.state.read().await.clone()
    }

    /// Whether a refresh currently holds the run lock
    pub fn is_refreshing(&self) -> bool {
        self.running.try_lock().is_err()
    }
}
