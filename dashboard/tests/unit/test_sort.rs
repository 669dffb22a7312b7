//! Sort tests

use octodash::models::deployment::DeploymentInfo;
use octodash::view::sort::{SortColumn, SortDirection, SortKey, SortState};

use crate::common::{deployed_at, deployment};

fn versions(rows: &[DeploymentInfo]) -> Vec<&str> {
    rows.iter().map(|d| d.version.as_str()).collect()
}

#[test]
fn test_click_toggles_single_key() {
    let mut state = SortState::default();

    state.click(SortColumn::Project);
    assert_eq!(state.keys(), &[SortKey::asc(SortColumn::Project)]);

    state.click(SortColumn::Project);
    assert_eq!(state.keys(), &[SortKey::desc(SortColumn::Project)]);

    state.click(SortColumn::Project);
    assert_eq!(state.keys(), &[SortKey::asc(SortColumn::Project)]);

    state.click(SortColumn::Tenant);
    assert_eq!(state.keys(), &[SortKey::asc(SortColumn::Tenant)]);
}

#[test]
fn test_click_replaces_multi_sort() {
    let mut state = SortState::new(vec![
        SortKey::desc(SortColumn::Project),
        SortKey::asc(SortColumn::Version),
    ]);

    state.click(SortColumn::Project);
    assert_eq!(state.keys(), &[SortKey::asc(SortColumn::Project)]);
}

#[test]
fn test_shift_click_cycles_asc_desc_removed() {
    let mut state = SortState::default();
    state.click(SortColumn::Project);

    state.shift_click(SortColumn::DeployedAt);
    assert_eq!(
        state.keys(),
        &[SortKey::asc(SortColumn::Project), SortKey::asc(SortColumn::DeployedAt)]
    );

    state.shift_click(SortColumn::DeployedAt);
    assert_eq!(state.keys()[1].direction, SortDirection::Desc);

    state.shift_click(SortColumn::DeployedAt);
    assert_eq!(state.keys(), &[SortKey::asc(SortColumn::Project)]);

    state.shift_click(SortColumn::Project);
    state.shift_click(SortColumn::Project);
    assert!(state.is_empty());
}

#[test]
fn test_multi_key_sort() {
    let mut rows = vec![
        deployment("Billing", "Prod", "Acme", "b"),
        deployment("Api", "Dev", "Acme", "c"),
        deployment("Billing", "Dev", "Acme", "a"),
        deployment("Api", "Prod", "Acme", "d"),
    ];

    let state = SortState::new(vec![
        SortKey::asc(SortColumn::Project),
        SortKey::desc(SortColumn::Environment),
    ]);
    state.sort(&mut rows);
    assert_eq!(versions(&rows), vec!["d", "c", "b", "a"]);

    let once = rows.clone();
    state.sort(&mut rows);
    assert_eq!(rows, once);
}

#[test]
fn test_sort_is_stable_for_ties() {
    let mut rows = vec![
        deployment("Billing", "Dev", "Acme", "first"),
        deployment("Api", "Dev", "Acme", "other"),
        deployment("Billing", "Dev", "Globex", "second"),
        deployment("Billing", "Dev", "Initech", "third"),
    ];

    SortState::new(vec![SortKey::asc(SortColumn::Project)]).sort(&mut rows);
    assert_eq!(versions(&rows), vec!["other", "first", "second", "third"]);

    SortState::new(vec![SortKey::desc(SortColumn::Project)]).sort(&mut rows);
    assert_eq!(versions(&rows), vec!["first", "second", "third", "other"]);
}

#[test]
fn test_empty_state_leaves_order_untouched() {
    let mut rows = vec![
        deployment("Search", "Dev", "Acme", "1"),
        deployment("Api", "Dev", "Acme", "2"),
    ];
    SortState::default().sort(&mut rows);
    assert_eq!(versions(&rows), vec!["1", "2"]);
}

#[test]
fn test_deployed_at_sorts_chronologically() {
    let mut rows = vec![
        deployed_at(deployment("A", "Dev", "Acme", "late"), "2025-03-02T08:00:00.000+00:00"),
        deployed_at(deployment("A", "Dev", "Acme", "running"), ""),
        // Same instant as "late" once the offset is applied
        deployed_at(deployment("A", "Dev", "Acme", "offset"), "2025-03-02T10:00:00.000+02:00"),
        deployed_at(deployment("A", "Dev", "Acme", "early"), "2025-01-15T23:59:59.000+00:00"),
    ];

    SortState::new(vec![SortKey::asc(SortColumn::DeployedAt)]).sort(&mut rows);
    assert_eq!(versions(&rows), vec!["running", "early", "late", "offset"]);

    SortState::new(vec![SortKey::desc(SortColumn::DeployedAt)]).sort(&mut rows);
    assert_eq!(versions(&rows), vec!["late", "offset", "early", "running"]);
}

#[test]
fn test_version_sorts_lexically() {
    let mut rows = vec![
        deployment("A", "Dev", "Acme", "10.0.0"),
        deployment("A", "Dev", "Acme", "9.0.0"),
        deployment("A", "Dev", "Acme", "1.2.0"),
    ];
    SortState::new(vec![SortKey::asc(SortColumn::Version)]).sort(&mut rows);
    assert_eq!(versions(&rows), vec!["1.2.0", "10.0.0", "9.0.0"]);
}
