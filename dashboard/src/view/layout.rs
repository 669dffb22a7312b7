//! 3D grid layout of the project × environment × tenant cross-product
//!
//! Projects run along X, environments along Y and tenants along Z. Each axis
//! is centered on the origin independently.

use std::cmp::Ordering;
use std::collections::HashMap;

use octopus_api::{Environment, Project, Tenant};
use serde::Serialize;

use crate::models::deployment::{DeploymentInfo, Feasibility};

/// Distance between neighbouring grid nodes
pub const DEFAULT_SPACING: f64 = 2.0;

/// How far axis labels sit outside the grid
pub const LABEL_OFFSET: f64 = 0.5;

pub type Point = [f64; 3];

/// Environment precedence parsed from a comma separated list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOrder {
    names: Vec<String>,
}

impl EnvOrder {
    pub fn parse(order: &str) -> Self {
        Self {
            names: order
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Position of the first listing of `name`
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Listed names first in listed order, then the rest by name
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.rank(a), self.rank(b)) {
            (Some(ra), Some(rb)) => ra.cmp(&rb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }

    pub fn sort_environments(&self, environments: &[Environment]) -> Vec<Environment> {
        let mut sorted = environments.to_vec();
        sorted.sort_by(|a, b| self.compare(&a.name, &b.name));
        sorted
    }
}

/// Coordinate of item `index` on an axis of `count` items
pub fn axis_coordinate(index: usize, count: usize, spacing: f64) -> f64 {
    index as f64 * spacing - (count.saturating_sub(1)) as f64 * spacing / 2.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Project,
    Environment,
    Tenant,
}

/// One item placed on an axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisItem {
    pub id: String,
    pub name: String,
    pub coordinate: f64,
}

/// A grid intersection, with the deployment found there if any
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridNode {
    pub position: Point,
    pub project_id: String,
    pub environment_id: String,
    pub tenant_id: String,
    pub deployment: Option<DeploymentInfo>,

    /// `None` when feasibility is unknown
    pub infeasible: Option<bool>,
}

/// Connector polyline running along one axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLine {
    pub axis: Axis,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    pub axis: Axis,
    pub label: String,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub spacing: f64,
    pub projects: Vec<AxisItem>,
    pub environments: Vec<AxisItem>,
    pub tenants: Vec<AxisItem>,
    pub nodes: Vec<GridNode>,
    pub lines: Vec<GridLine>,
    pub labels: Vec<AxisLabel>,
}

fn place<I>(items: I, spacing: f64) -> Vec<AxisItem>
where
    I: ExactSizeIterator<Item = (String, String)>,
{
    let count = items.len();
    items
        .enumerate()
        .map(|(idx, (id, name))| AxisItem {
            id,
            name,
            coordinate: axis_coordinate(idx, count, spacing),
        })
        .collect()
}

/// Lay out every project/environment/tenant combination on a centered grid
pub fn compute_layout(
    projects: &[Project],
    environments: &[Environment],
    tenants: &[Tenant],
    deployments: &[DeploymentInfo],
    env_order: &str,
    spacing: f64,
) -> Layout {
    let mut projects = projects.to_vec();
    projects.sort_by(|a, b| a.name.cmp(&b.name));
    let mut tenants = tenants.to_vec();
    tenants.sort_by(|a, b| a.name.cmp(&b.name));
    let environments = EnvOrder::parse(env_order).sort_environments(environments);

    let xs = place(projects.into_iter().map(|p| (p.id, p.name)), spacing);
    let ys = place(environments.into_iter().map(|e| (e.id, e.name)), spacing);
    let zs = place(tenants.into_iter().map(|t| (t.id, t.name)), spacing);

    let by_key: HashMap<(&str, &str, &str), &DeploymentInfo> = deployments
        .iter()
        .map(|d| {
            (
                (d.project_id.as_str(), d.environment_id.as_str(), d.tenant_id.as_str()),
                d,
            )
        })
        .collect();

    let mut nodes = Vec::with_capacity(xs.len() * ys.len() * zs.len());
    for x in &xs {
        for y in &ys {
            for z in &zs {
                nodes.push(GridNode {
                    position: [x.coordinate, y.coordinate, z.coordinate],
                    project_id: x.id.clone(),
                    environment_id: y.id.clone(),
                    tenant_id: z.id.clone(),
                    deployment: by_key
                        .get(&(x.id.as_str(), y.id.as_str(), z.id.as_str()))
                        .map(|d| (*d).clone()),
                    infeasible: None,
                });
            }
        }
    }

    let lines = grid_lines(&xs, &ys, &zs);
    let labels = axis_labels(&xs, &ys, &zs);

    Layout {
        spacing,
        projects: xs,
        environments: ys,
        tenants: zs,
        nodes,
        lines,
        labels,
    }
}

impl Layout {
    /// Flag nodes whose environment/tenant pair no target can reach
    ///
    /// Nodes keep `infeasible: None` when feasibility was not computed.
    pub fn with_feasibility(mut self, feasibility: &Feasibility) -> Self {
        if !feasibility.is_computed() {
            return self;
        }
        for node in &mut self.nodes {
            node.infeasible = feasibility.is_infeasible(&node.environment_id, &node.tenant_id);
        }
        self
    }
}

// A line along an axis only exists when that axis has at least two members,
// matching the 3D view this layout feeds: a single item draws no connector.
fn grid_lines(xs: &[AxisItem], ys: &[AxisItem], zs: &[AxisItem]) -> Vec<GridLine> {
    let mut lines = Vec::new();

    if xs.len() >= 2 {
        for y in ys {
            for z in zs {
                lines.push(GridLine {
                    axis: Axis::Project,
                    points: xs.iter().map(|x| [x.coordinate, y.coordinate, z.coordinate]).collect(),
                });
            }
        }
    }

    if ys.len() >= 2 {
        for z in zs {
            for x in xs {
                lines.push(GridLine {
                    axis: Axis::Environment,
                    points: ys.iter().map(|y| [x.coordinate, y.coordinate, z.coordinate]).collect(),
                });
            }
        }
    }

    if zs.len() >= 2 {
        for x in xs {
            for y in ys {
                lines.push(GridLine {
                    axis: Axis::Tenant,
                    points: zs.iter().map(|z| [x.coordinate, y.coordinate, z.coordinate]).collect(),
                });
            }
        }
    }

    lines
}

fn axis_labels(xs: &[AxisItem], ys: &[AxisItem], zs: &[AxisItem]) -> Vec<AxisLabel> {
    let edge = |items: &[AxisItem]| items.first().map(|i| i.coordinate).unwrap_or(0.0) - LABEL_OFFSET;
    let (x_edge, y_edge, z_edge) = (edge(xs), edge(ys), edge(zs));

    let projects = xs.iter().map(|x| AxisLabel {
        axis: Axis::Project,
        label: x.name.clone(),
        position: [x.coordinate, y_edge, z_edge],
    });
    let environments = ys.iter().map(|y| AxisLabel {
        axis: Axis::Environment,
        label: y.name.clone(),
        position: [x_edge, y.coordinate, z_edge],
    });
    let tenants = zs.iter().map(|z| AxisLabel {
        axis: Axis::Tenant,
        label: z.name.clone(),
        position: [x_edge, y_edge, z.coordinate],
    });

    projects.chain(environments).chain(tenants).collect()
}
