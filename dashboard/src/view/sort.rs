//! Multi-column table sorting

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::DashboardError;
use crate::models::deployment::DeploymentInfo;

/// Sortable table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    Project,
    Environment,
    Tenant,
    Version,
    DeployedAt,
}

impl SortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Project => "project",
            SortColumn::Environment => "environment",
            SortColumn::Tenant => "tenant",
            SortColumn::Version => "version",
            SortColumn::DeployedAt => "deployedAt",
        }
    }

    fn compare(&self, a: &DeploymentInfo, b: &DeploymentInfo) -> Ordering {
        match self {
            SortColumn::Project => a.project_name.cmp(&b.project_name),
            SortColumn::Environment => a.environment_name.cmp(&b.environment_name),
            SortColumn::Tenant => a.tenant_name.cmp(&b.tenant_name),
            SortColumn::Version => a.version.cmp(&b.version),
            SortColumn::DeployedAt => {
                parse_timestamp(&a.deployed_at).cmp(&parse_timestamp(&b.deployed_at))
            }
        }
    }
}

impl FromStr for SortColumn {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project" => Ok(SortColumn::Project),
            "environment" => Ok(SortColumn::Environment),
            "tenant" => Ok(SortColumn::Tenant),
            "version" => Ok(SortColumn::Version),
            "deployedAt" => Ok(SortColumn::DeployedAt),
            _ => Err(DashboardError::InvalidQuery(format!("unknown sort column: {}", s))),
        }
    }
}

/// Parse a deploy timestamp to epoch milliseconds
///
/// Empty or unparseable values yield `None`, which orders before every instant.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    if value.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp_millis())
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|dt| dt.and_utc().timestamp_millis())
        })
        .ok()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(column: SortColumn) -> Self {
        Self { column, direction: SortDirection::Asc }
    }

    pub fn desc(column: SortColumn) -> Self {
        Self { column, direction: SortDirection::Desc }
    }
}

/// Ordered sort keys; the first key is the primary one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    keys: Vec<SortKey>,
}

impl SortState {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn position(&self, column: SortColumn) -> Option<usize> {
        self.keys.iter().position(|key| key.column == column)
    }

    /// Plain click on a column header
    ///
    /// Toggles the direction when the column is the only key; otherwise the
    /// column becomes the only key, ascending.
    pub fn click(&mut self, column: SortColumn) {
        if self.keys.len() == 1 && self.keys[0].column == column {
            self.keys[0].direction = self.keys[0].direction.toggled();
        } else {
            self.keys = vec![SortKey::asc(column)];
        }
    }

    /// Shift-click on a column header
    ///
    /// Appends the column ascending, flips an ascending key to descending, or
    /// removes a descending key.
    pub fn shift_click(&mut self, column: SortColumn) {
        match self.position(column) {
            None => self.keys.push(SortKey::asc(column)),
            Some(idx) => match self.keys[idx].direction {
                SortDirection::Asc => self.keys[idx].direction = SortDirection::Desc,
                SortDirection::Desc => {
                    self.keys.remove(idx);
                }
            },
        }
    }

    pub fn compare(&self, a: &DeploymentInfo, b: &DeploymentInfo) -> Ordering {
        self.keys
            .iter()
            .map(|key| key.direction.apply(key.column.compare(a, b)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    /// Stable in-place sort; ties keep their relative order
    pub fn sort(&self, deployments: &mut [DeploymentInfo]) {
        if self.keys.is_empty() {
            return;
        }
        deployments.sort_by(|a, b| self.compare(a, b));
    }
}

/// Query form: `project:asc,deployedAt:desc`; a missing direction means ascending
impl FromStr for SortState {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut state = SortState::default();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (column, direction) = match part.split_once(':') {
                Some((column, direction)) => (column, direction),
                None => (part, "asc"),
            };
            let column: SortColumn = column.parse()?;
            let direction = match direction {
                "asc" => SortDirection::Asc,
                "desc" => SortDirection::Desc,
                other => {
                    return Err(DashboardError::InvalidQuery(format!(
                        "unknown sort direction: {}",
                        other
                    )))
                }
            };
            if state.position(column).is_some() {
                return Err(DashboardError::InvalidQuery(format!(
                    "duplicate sort column: {}",
                    column.as_str()
                )));
            }
            state.keys.push(SortKey { column, direction });
        }
        Ok(state)
    }
}

impl fmt::Display for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .keys
            .iter()
            .map(|key| {
                let direction = match key.direction {
                    SortDirection::Asc => "asc",
                    SortDirection::Desc => "desc",
                };
                format!("{}:{}", key.column.as_str(), direction)
            })
            .collect();
        f.write_str(&rendered.join(","))
    }
}
