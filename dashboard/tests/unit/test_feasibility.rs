//! Feasibility tests

use std::collections::BTreeSet;

use octodash::models::deployment::{EnvTenantPair, Feasibility};
use octodash::services::feasibility::compute_feasibility;
use octopus_api::{DeploymentTarget, TenantedDeploymentParticipation};

use crate::common::{environment, tenant};

fn target(
    envs: &[&str],
    tenants: &[&str],
    participation: TenantedDeploymentParticipation,
) -> DeploymentTarget {
    DeploymentTarget {
        id: "Machines-1".to_string(),
        name: "target".to_string(),
        environment_ids: envs.iter().map(|s| s.to_string()).collect(),
        tenant_ids: tenants.iter().map(|s| s.to_string()).collect(),
        tenanted_deployment_participation: participation,
    }
}

#[test]
fn test_no_targets_is_not_computed() {
    let feasibility = compute_feasibility(&[], &[environment("E1", "Dev")], &[tenant("T1", "Acme")]);
    assert_eq!(feasibility, Feasibility::NotComputed);
    assert_eq!(feasibility.is_infeasible("E1", "T1"), None);
}

#[test]
fn test_partition_covers_product() {
    let environments = vec![environment("E1", "Dev"), environment("E2", "Prod")];
    let tenants = vec![tenant("T1", "Acme"), tenant("T2", "Globex"), tenant("T3", "Initech")];
    let targets = vec![
        target(&["E1"], &["T1", "T2"], TenantedDeploymentParticipation::Tenanted),
        target(&["E2"], &["T3"], TenantedDeploymentParticipation::TenantedOrUntenanted),
    ];

    let Feasibility::Computed { feasible, infeasible } =
        compute_feasibility(&targets, &environments, &tenants)
    else {
        panic!("expected computed feasibility");
    };

    let product: BTreeSet<EnvTenantPair> = environments
        .iter()
        .flat_map(|e| tenants.iter().map(move |t| EnvTenantPair::new(e.id.as_str(), t.id.as_str())))
        .collect();

    assert!(feasible.is_disjoint(&infeasible));
    let union: BTreeSet<EnvTenantPair> = feasible.union(&infeasible).cloned().collect();
    assert_eq!(union, product);

    assert!(feasible.contains(&EnvTenantPair::new("E1", "T2")));
    assert!(feasible.contains(&EnvTenantPair::new("E2", "T3")));
    assert!(infeasible.contains(&EnvTenantPair::new("E2", "T1")));
    assert_eq!(feasible.len(), 3);
    assert_eq!(infeasible.len(), 3);
}

#[test]
fn test_untenanted_target_contributes_nothing() {
    let environments = vec![environment("E1", "Dev")];
    let tenants = vec![tenant("T1", "Acme")];
    let targets = vec![target(&["E1"], &["T1"], TenantedDeploymentParticipation::Untenanted)];

    let feasibility = compute_feasibility(&targets, &environments, &tenants);
    assert!(feasibility.is_computed());
    assert_eq!(feasibility.is_infeasible("E1", "T1"), Some(true));
}

#[test]
fn test_computed_and_empty_differs_from_not_computed() {
    let targets = vec![target(&["E1"], &["T1"], TenantedDeploymentParticipation::Tenanted)];
    let feasibility = compute_feasibility(&targets, &[], &[]);

    assert_eq!(
        feasibility,
        Feasibility::Computed {
            feasible: BTreeSet::new(),
            infeasible: BTreeSet::new(),
        }
    );
    assert_ne!(feasibility, Feasibility::NotComputed);
}
