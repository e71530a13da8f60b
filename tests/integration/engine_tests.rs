//! End-to-end engine tests: ingestion through the view models

use anyhow::Result;

use pulsemetrics_rs::core::analytics::views;
use pulsemetrics_rs::core::analytics::{SortDirection, UserColumn};
use pulsemetrics_rs::{Component, Environment, FilterState, Selection};

use crate::common::fixtures::{self, DAILY_ACTIVE, day};

#[test]
fn test_ingest_skips_and_counts_malformed_rows() {
    let store = fixtures::store();
    let report = store.report();

    assert_eq!(report.users_skipped, 3);
    assert_eq!(report.tenancies_skipped, 0);
    assert_eq!(report.licences_skipped, 1);
    assert_eq!(report.timeseries_skipped, 1);
    assert_eq!(report.total_skipped(), 5);

    // Ten well-formed user rows survive, nine distinct users
    assert_eq!(store.users().len(), 10);
}

#[test]
fn test_reference_date_and_default_window() {
    let store = fixtures::store();

    assert_eq!(store.reference_date(), Some(day(2024, 3, 31)));
    assert_eq!(
        store.default_window(),
        Some((day(2024, 3, 2), day(2024, 3, 31)))
    );
}

#[test]
fn test_filter_option_lists() {
    let store = fixtures::store();

    assert_eq!(store.tenancy_options(), vec!["Meridian", "Nebula", "Phoenix"]);
    assert_eq!(
        store.component_options(),
        vec![Component::Connect, Component::Workbench]
    );
    assert_eq!(
        store.environment_options(),
        vec![
            Environment::Production,
            Environment::Development,
            Environment::Staging,
        ]
    );
}

#[test]
fn test_environment_alias_maps_to_production() -> Result<()> {
    let engine = fixtures::engine();
    let state = FilterState::new(
        Selection::All,
        Selection::One(Environment::Production),
        Selection::All,
        day(2024, 3, 1),
        day(2024, 3, 31),
    )?;

    // u-1009 was exported with environment "Live" and must pass the
    // Production filter
    let users = engine.compute_users(&state);
    assert!(users.table.iter().any(|row| row.user_id == "u-1009"));
    Ok(())
}

#[test]
fn test_overview_march_figures() {
    let engine = fixtures::engine();
    let overview = engine.compute_overview(&fixtures::march());

    assert_eq!(overview.active_users, 6);
    // Nobody active in March appears before the comparison horizon
    assert_eq!(overview.new_users, 6);
    // 31 days of constant activity
    assert_eq!(overview.session_hours, 31.0 * DAILY_ACTIVE as f64 * 8.5);
    assert_eq!(overview.total_users, 10_500);
    assert_eq!(overview.deltas.total_users.change_pct, 0.0);

    // March 2024 spans five calendar weeks starting Mon Feb 26
    assert_eq!(overview.weekly_series.len(), 5);
    for week in &overview.weekly_series {
        assert_eq!(week.active_users, DAILY_ACTIVE as f64);
    }

    // Ranked after aggregation: Phoenix leads the pre-aggregated rows
    assert_eq!(overview.top_tenancies[0].tenancy, "Phoenix");
    assert_eq!(overview.top_tenancies.len(), 3);
}

#[test]
fn test_licence_view_scoped_to_component() -> Result<()> {
    let engine = fixtures::engine();
    let state = FilterState::new(
        Selection::All,
        Selection::All,
        Selection::One(Component::Connect),
        day(2024, 3, 1),
        day(2024, 3, 31),
    )?;

    let licences = engine.compute_licences(&state);
    assert_eq!(licences.assigned_connect, 180 + 150 + 40);
    assert_eq!(licences.assigned_workbench, 0);
    // Connect users active in March: u-1001, u-1002, u-1004, u-1009
    assert_eq!(licences.active_connect, 4);
    assert_eq!(licences.active_workbench, 0);

    // Utilization derives from stored sums without mutating them
    let pct = licences.connect_utilization_pct();
    assert!((pct - 3.7).abs() < 1e-9);
    assert_eq!(licences.assigned_connect, 370);
    Ok(())
}

#[test]
fn test_licence_totals_match_table() {
    let engine = fixtures::engine();
    let licences = engine.compute_licences(&fixtures::march());

    for totals in &licences.totals {
        let assigned: u64 = licences
            .table
            .iter()
            .filter(|row| row.component == totals.component)
            .map(|row| row.assigned)
            .sum();
        assert_eq!(totals.assigned, assigned);
    }
}

#[test]
fn test_users_view_reads_latest_point() {
    let engine = fixtures::engine();
    let users = engine.compute_users(&fixtures::march());

    assert_eq!(users.daily_count, 45);
    assert_eq!(users.weekly_count, 130);
    assert_eq!(users.active_count, 6);
    assert_eq!(users.dormant_count, 10_500 - 6);
    assert_eq!(users.distribution.total(), fixtures::TIER_POPULATION);
    assert_eq!(users.session.sessions_per_user, DAILY_ACTIVE as f64);

    // Default order: most recent login first, u-1009 on the 31st
    assert_eq!(users.table[0].user_id, "u-1009");
}

#[test]
fn test_user_table_search_narrows_before_truncation() {
    let engine = fixtures::engine();
    let wide = fixtures::window(day(2024, 1, 1), day(2024, 3, 31));

    let rows = engine.user_table(&wide, Some("1007"), UserColumn::UserId, SortDirection::Ascending);
    assert_eq!(rows.len(), 1);
    // Resolution already attributed u-1007 to Phoenix/Workbench
    assert_eq!(rows[0].tenancy, "Phoenix");
    assert_eq!(rows[0].component, Component::Workbench);
}

#[test]
fn test_sort_user_rows_repeated_sorts_identical() {
    let engine = fixtures::engine();
    let users = engine.compute_users(&fixtures::march());

    let first = views::sort_user_rows(&users.table, UserColumn::Tenancy, SortDirection::Ascending);
    let second = views::sort_user_rows(&first, UserColumn::Tenancy, SortDirection::Ascending);
    assert_eq!(first, second);
}

#[test]
fn test_views_agree_across_tabs() {
    let engine = fixtures::engine();
    let state = fixtures::march();

    let overview = engine.compute_overview(&state);
    let users = engine.compute_users(&state);
    let tenancies = engine.compute_tenancies(&state);

    assert_eq!(overview.active_users, users.active_count);
    let summed: u64 = tenancies.table.iter().map(|row| row.active_users).sum();
    assert_eq!(summed, overview.active_users);
}

#[test]
fn test_snapshot_submission_is_last_write_wins() {
    let engine = fixtures::engine();

    engine.submit(&fixtures::march());
    let narrow = fixtures::window(day(2024, 3, 30), day(2024, 3, 31));
    engine.submit(&narrow);

    let latest = engine.latest().expect("a snapshot was published");
    assert_eq!(latest.state, narrow);
}

#[test]
fn test_tenancy_filter_scopes_every_view() -> Result<()> {
    let engine = fixtures::engine();
    let state = FilterState::new(
        fixtures::tenancy("Nebula"),
        Selection::All,
        Selection::All,
        day(2024, 3, 1),
        day(2024, 3, 31),
    )?;

    let snapshot = engine.snapshot(&state);
    // Nebula users active in March: u-1001, u-1002, u-1003
    assert_eq!(snapshot.overview.active_users, 3);
    assert!(snapshot.users.table.iter().all(|row| row.tenancy == "Nebula"));
    assert_eq!(snapshot.tenancies.table.len(), 1);
    assert_eq!(snapshot.tenancies.table[0].tenancy, "Nebula");
    assert!(snapshot
        .licences
        .table
        .iter()
        .all(|row| row.tenancy == "Nebula"));
    Ok(())
}
