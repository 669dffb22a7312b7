//! Environment/tenant feasibility from deployment target tenancy

use std::collections::{BTreeSet, HashSet};

use octopus_api::{DeploymentTarget, Environment, Tenant};

use crate::models::deployment::{EnvTenantPair, Feasibility};

/// Partition environments × tenants into feasible and infeasible pairs
///
/// A pair is feasible when some target accepting tenanted deployments lists
/// both the environment and the tenant. Pairs naming ids outside the
/// directories are ignored, so the two sets always cover the product exactly.
/// With no targets at all the result is `NotComputed`.
pub fn compute_feasibility(
    targets: &[DeploymentTarget],
    environments: &[Environment],
    tenants: &[Tenant],
) -> Feasibility {
    if targets.is_empty() {
        return Feasibility::NotComputed;
    }

    let reachable: HashSet<(&str, &str)> = targets
        .iter()
        .filter(|target| target.tenanted_deployment_participation.accepts_tenants())
        .flat_map(|target| {
            target.environment_ids.iter().flat_map(move |env_id| {
                target
                    .tenant_ids
                    .iter()
                    .map(move |tenant_id| (env_id.as_str(), tenant_id.as_str()))
            })
        })
        .collect();

    let mut feasible = BTreeSet::new();
    let mut infeasible = BTreeSet::new();
    for env in environments {
        for tenant in tenants {
            let pair = EnvTenantPair::new(env.id.as_str(), tenant.id.as_str());
            if reachable.contains(&(env.id.as_str(), tenant.id.as_str())) {
                feasible.insert(pair);
            } else {
                infeasible.insert(pair);
            }
        }
    }

    Feasibility::Computed { feasible, infeasible }
}
