//! Filter tests

use octodash::view::filter::{DeploymentFilter, FilterOptions};
use octodash::view::stats::Stats;
use octopus_api::DeploymentState;

use crate::common::deployment;

fn table() -> Vec<octodash::models::deployment::DeploymentInfo> {
    vec![
        deployment("Billing", "Dev", "Acme", "1.0.0"),
        deployment("Billing", "Prod", "Globex", "1.1.0"),
        deployment("Api", "Dev", "Globex", "2.0.0-beta"),
        deployment("Search", "Prod", "Acme", "3.4.5"),
    ]
}

#[test]
fn test_empty_filter_keeps_everything() {
    let filter = DeploymentFilter::default();
    assert!(!filter.is_active());
    assert_eq!(filter.apply(&table()), table());

    let blank = DeploymentFilter {
        project: Some(String::new()),
        search: Some(String::new()),
        ..Default::default()
    };
    assert!(!blank.is_active());
    assert_eq!(blank.apply(&table()).len(), 4);
}

#[test]
fn test_exact_fields_are_conjunctive() {
    let filter = DeploymentFilter {
        project: Some("Billing".to_string()),
        tenant: Some("Globex".to_string()),
        ..Default::default()
    };
    assert!(filter.is_active());

    let rows = filter.apply(&table());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].environment_name, "Prod");

    let case_sensitive = DeploymentFilter {
        project: Some("billing".to_string()),
        ..Default::default()
    };
    assert!(case_sensitive.apply(&table()).is_empty());
}

#[test]
fn test_search_is_case_insensitive_across_fields() {
    let search = |needle: &str| {
        DeploymentFilter {
            search: Some(needle.to_string()),
            ..Default::default()
        }
        .apply(&table())
    };

    assert_eq!(search("GLOBEX").len(), 2);
    assert_eq!(search("beta").len(), 1);
    assert_eq!(search("prod").len(), 2);
    assert_eq!(search("3.4").len(), 1);
    assert!(search("nothing-here").is_empty());
}

#[test]
fn test_filter_preserves_input_order() {
    let filter = DeploymentFilter {
        environment: Some("Dev".to_string()),
        ..Default::default()
    };
    let rows = filter.apply(&table());
    let projects: Vec<&str> = rows.iter().map(|d| d.project_name.as_str()).collect();
    assert_eq!(projects, vec!["Billing", "Api"]);

    assert_eq!(filter.apply(&rows), rows);
}

#[test]
fn test_filter_options_are_distinct_and_sorted() {
    let options = FilterOptions::from_deployments(&table());
    assert_eq!(options.projects, vec!["Api", "Billing", "Search"]);
    assert_eq!(options.environments, vec!["Dev", "Prod"]);
    assert_eq!(options.tenants, vec!["Acme", "Globex"]);
}

#[test]
fn test_stats_count_all_and_filtered() {
    let mut all = table();
    all[1].state = DeploymentState::Failed;
    all[2].state = DeploymentState::Executing;

    let filtered = DeploymentFilter {
        tenant: Some("Globex".to_string()),
        ..Default::default()
    }
    .apply(&all);

    let stats = Stats::compute(&all, &filtered);
    assert_eq!(stats.displayed, 2);
    assert_eq!(stats.total_deployments, 4);
    assert_eq!(stats.total_projects, 3);
    assert_eq!(stats.total_environments, 2);
    assert_eq!(stats.total_tenants, 2);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.failed, 1);
}
