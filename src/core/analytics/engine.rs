//! Metrics engine: memoized recomputation over the immutable store
//!
//! One FilterState change drives one full recomputation pass in
//! dependency order: resolve, filter, then the period comparator,
//! categorization, aggregation, and ranking stages. No stage mutates the
//! record store, and no stage starts before its inputs are complete.

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwapOption;
use chrono::{Duration, NaiveDate};
use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::core::models::{Component, FilterState, TimeSeriesPoint, UserRecord};
use crate::storage::DatasetStore;

use super::periods::{DateWindow, PeriodDelta};
use super::views::{
    LicenceDeltas, LicenceView, OverviewDeltas, OverviewView, SessionMetrics, TenancyRow,
    TenancySummary, TenancyView, UserColumn, UserRow, UsersDeltas, UsersView,
};
use super::{aggregate, categorize, filters, ranking, resolver, views};

/// Row cap for the users table
const USER_TABLE_LIMIT: usize = 100;
/// Tenancies shown in the overview bar chart
const TOP_TENANCIES: usize = 5;

/// A fully recomputed set of dashboard views for one filter state
///
/// Every view inside derives from the same working sets, so figures agree
/// across cards, charts, and tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Filter state the snapshot was computed for
    pub state: FilterState,
    /// Overview tab
    pub overview: OverviewView,
    /// Licences tab
    pub licences: LicenceView,
    /// Users tab
    pub users: UsersView,
    /// Tenancies tab
    pub tenancies: TenancyView,
}

/// Published snapshot with its supersession generation
#[derive(Debug)]
struct Published {
    generation: u64,
    snapshot: Arc<DashboardSnapshot>,
}

/// The metrics aggregation and filtering engine
///
/// A pure function of (dataset snapshot, filter state). Recomputation is
/// memoized by (dataset version, state); the cache invalidates strictly
/// on key change, never partially.
pub struct MetricsEngine {
    store: Arc<DatasetStore>,
    config: EngineConfig,
    /// Resolved set: one record per user id, latest login wins
    resolved: Vec<UserRecord>,
    cache: Mutex<LruCache<(u64, FilterState), Arc<DashboardSnapshot>>>,
    generation: AtomicU64,
    latest: ArcSwapOption<Published>,
}

impl MetricsEngine {
    /// Build an engine over an ingested store
    ///
    /// Identity resolution runs once here; every later computation starts
    /// from the resolved set.
    pub fn new(store: Arc<DatasetStore>, config: EngineConfig) -> Self {
        let resolved = resolver::resolve(store.users());
        info!(
            raw_users = store.users().len(),
            resolved_users = resolved.len(),
            dataset_version = store.version(),
            "metrics engine ready"
        );

        let capacity =
            NonZeroUsize::new(config.cache.max_snapshots).unwrap_or(NonZeroUsize::MIN);
        Self {
            store,
            config,
            resolved,
            cache: Mutex::new(LruCache::new(capacity)),
            generation: AtomicU64::new(0),
            latest: ArcSwapOption::empty(),
        }
    }

    /// The store the engine computes over
    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// The resolved user set
    pub fn resolved(&self) -> &[UserRecord] {
        &self.resolved
    }

    /// Memoized full recomputation for a filter state
    pub fn snapshot(&self, state: &FilterState) -> Arc<DashboardSnapshot> {
        let key = (self.store.version(), state.clone());
        if self.config.cache.enabled {
            let mut cache = self.cache.lock();
            if let Some(hit) = cache.get(&key) {
                debug!("snapshot cache hit");
                return Arc::clone(hit);
            }
        }

        let snapshot = Arc::new(self.recompute(state));
        if self.config.cache.enabled {
            self.cache.lock().put(key, Arc::clone(&snapshot));
        }
        snapshot
    }

    /// Compute and publish with last-write-wins supersession
    ///
    /// Each submission takes a generation from an atomic counter; a
    /// snapshot only becomes `latest()` while its generation is still the
    /// newest, so results of superseded submissions are discarded rather
    /// than published.
    pub fn submit(&self, state: &FilterState) -> Arc<DashboardSnapshot> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = self.snapshot(state);
        let candidate = Arc::new(Published {
            generation,
            snapshot: Arc::clone(&snapshot),
        });
        self.latest.rcu(|current| match current {
            Some(existing) if existing.generation > generation => Some(Arc::clone(existing)),
            _ => Some(Arc::clone(&candidate)),
        });
        snapshot
    }

    /// The most recently published snapshot, if any
    pub fn latest(&self) -> Option<Arc<DashboardSnapshot>> {
        self.latest.load_full().map(|p| Arc::clone(&p.snapshot))
    }

    /// Overview tab: stat cards, weekly series, top tenancies
    pub fn compute_overview(&self, state: &FilterState) -> OverviewView {
        self.snapshot(state).overview.clone()
    }

    /// Licences tab: assigned/active per component plus the usage table
    pub fn compute_licences(&self, state: &FilterState) -> LicenceView {
        self.snapshot(state).licences.clone()
    }

    /// Users tab: counts, distribution, session estimates, user table
    pub fn compute_users(&self, state: &FilterState) -> UsersView {
        self.snapshot(state).users.clone()
    }

    /// Tenancies tab: per-tenancy totals and licence figures
    pub fn compute_tenancies(&self, state: &FilterState) -> TenancyView {
        self.snapshot(state).tenancies.clone()
    }

    /// Users table with optional id search and column sorting
    ///
    /// Search narrows the working set before sorting; truncation happens
    /// strictly after.
    pub fn user_table(
        &self,
        state: &FilterState,
        query: Option<&str>,
        column: UserColumn,
        direction: ranking::SortDirection,
    ) -> Vec<UserRow> {
        let working = filters::apply(&self.resolved, state);
        let matched = filters::search_user_ids(&working, query);
        let rows = views::user_rows(
            &matched,
            self.reference_date(DateWindow::of(state)),
            self.frequency_window_days(DateWindow::of(state)),
            &self.config.windows,
        );
        ranking::truncated(
            &views::sort_user_rows(&rows, column, direction),
            USER_TABLE_LIMIT,
        )
    }

    fn reference_date(&self, window: DateWindow) -> NaiveDate {
        self.store.reference_date().unwrap_or(window.end)
    }

    fn frequency_window_days(&self, window: DateWindow) -> i64 {
        self.config
            .windows
            .frequency_window_days
            .map(i64::from)
            .unwrap_or_else(|| window.len_days())
    }

    fn recompute(&self, state: &FilterState) -> DashboardSnapshot {
        debug!(
            start = %state.start_date(),
            end = %state.end_date(),
            "full recompute"
        );
        let window = DateWindow::of(state);
        let previous = window.preceding();

        let working = filters::apply(&self.resolved, state);
        let working_prev = filters::apply_in_window(&self.resolved, state, previous);
        let dimension_set = filters::apply_dimensions(&self.resolved, state);
        let ts_current = filters::timeseries_in_window(self.store.timeseries(), window);
        let ts_previous = filters::timeseries_in_window(self.store.timeseries(), previous);

        let ctx = ComputeContext {
            config: &self.config,
            store: &self.store,
            resolved: &self.resolved,
            state,
            window,
            previous,
            working: &working,
            working_prev: &working_prev,
            dimension_set: &dimension_set,
            ts_current: &ts_current,
            ts_previous: &ts_previous,
        };

        DashboardSnapshot {
            state: state.clone(),
            overview: ctx.overview(),
            licences: ctx.licences(),
            users: ctx.users(),
            tenancies: ctx.tenancies(),
        }
    }
}

/// Working sets shared by the view builders during one recompute pass
struct ComputeContext<'a> {
    config: &'a EngineConfig,
    store: &'a DatasetStore,
    resolved: &'a [UserRecord],
    state: &'a FilterState,
    window: DateWindow,
    previous: DateWindow,
    working: &'a [UserRecord],
    working_prev: &'a [UserRecord],
    dimension_set: &'a [UserRecord],
    ts_current: &'a [TimeSeriesPoint],
    ts_previous: &'a [TimeSeriesPoint],
}

impl ComputeContext<'_> {
    fn overview(&self) -> OverviewView {
        let placeholders = &self.config.placeholders;
        let factor = placeholders.session_hours_per_active_user;

        let active = self.working.len() as u64;
        let active_prev = self.working_prev.len() as u64;

        let new_users = self.new_users_in(self.window, self.previous.start);
        let new_prev =
            self.new_users_in(self.previous, self.previous.start - Duration::days(1));

        let session_hours = session_hours_total(self.ts_current, factor);
        let session_hours_prev = session_hours_total(self.ts_previous, factor);

        let top_tenancies = ranking::top_n(self.store.tenancies(), TOP_TENANCIES, |t| {
            t.active_users
        })
        .into_iter()
        .map(|t| TenancySummary {
            session_hours: t.active_users as f64 * factor,
            active_users: t.active_users,
            tenancy: t.tenancy,
        })
        .collect();

        let total = placeholders.total_users as f64;
        OverviewView {
            total_users: placeholders.total_users,
            active_users: active,
            new_users,
            session_hours,
            weekly_series: aggregate::weekly_rollup(self.ts_current, factor),
            top_tenancies,
            deltas: OverviewDeltas {
                total_users: PeriodDelta::compare(total, total),
                active_users: PeriodDelta::compare(active as f64, active_prev as f64),
                new_users: PeriodDelta::compare(new_users as f64, new_prev as f64),
                session_hours: PeriodDelta::compare(session_hours, session_hours_prev),
            },
        }
    }

    /// New users: ids active in the window that were never seen before the
    /// comparison horizon
    ///
    /// Runs over the raw rows rather than the resolved set: resolution
    /// deliberately erases a user's earlier appearances, and those are
    /// exactly what distinguishes a returning user from a new one.
    fn new_users_in(&self, window: DateWindow, horizon: NaiveDate) -> u64 {
        let mut seen_before: HashSet<&str> = HashSet::new();
        let mut in_window: HashSet<&str> = HashSet::new();
        for record in self.store.users() {
            if !filters::matches_dimensions(record, self.state) {
                continue;
            }
            if record.last_login < horizon {
                seen_before.insert(record.user_id.as_str());
            }
            if window.contains(record.last_login) {
                in_window.insert(record.user_id.as_str());
            }
        }
        in_window.difference(&seen_before).count() as u64
    }

    fn licences(&self) -> LicenceView {
        let scoped = filters::apply_licences(self.store.licences(), self.state);
        let table = aggregate::licence_rollup(&scoped, self.working);
        let totals = aggregate::component_totals(&table);

        let assigned = |component: Component| {
            totals
                .iter()
                .find(|t| t.component == component)
                .map(|t| t.assigned)
                .unwrap_or(0)
        };
        let active_connect = component_count(self.working, Component::Connect);
        let active_workbench = component_count(self.working, Component::Workbench);
        let active_connect_prev = component_count(self.working_prev, Component::Connect);
        let active_workbench_prev = component_count(self.working_prev, Component::Workbench);

        LicenceView {
            assigned_connect: assigned(Component::Connect),
            active_connect,
            assigned_workbench: assigned(Component::Workbench),
            active_workbench,
            connect_capacity: self.config.capacity.connect_licences,
            workbench_capacity: self.config.capacity.workbench_licences,
            deltas: LicenceDeltas {
                active_connect: PeriodDelta::compare(
                    active_connect as f64,
                    active_connect_prev as f64,
                ),
                active_workbench: PeriodDelta::compare(
                    active_workbench as f64,
                    active_workbench_prev as f64,
                ),
            },
            table,
            totals,
        }
    }

    fn users(&self) -> UsersView {
        let placeholders = &self.config.placeholders;
        let factor = placeholders.session_hours_per_active_user;

        let active = self.working.len() as u64;
        let active_prev = self.working_prev.len() as u64;
        let dormant = placeholders.total_users.saturating_sub(active);
        let dormant_prev = placeholders.total_users.saturating_sub(active_prev);

        let latest = self.ts_current.iter().max_by_key(|p| p.date);
        let latest_prev = self.ts_previous.iter().max_by_key(|p| p.date);
        let daily = latest.map_or(0, |p| p.power_users);
        let weekly = latest.map_or(0, |p| p.regular_users);
        let daily_prev = latest_prev.map_or(0, |p| p.power_users);
        let weekly_prev = latest_prev.map_or(0, |p| p.regular_users);

        // Without in-window series rows, classify the dimension-filtered
        // population instead of reading an absent latest point.
        let distribution = match latest {
            Some(point) => categorize::TierDistribution::from_point(point),
            None => categorize::TierDistribution::from_users(self.dimension_set),
        };

        let session_hours = session_hours_total(self.ts_current, factor);
        let session_hours_prev = session_hours_total(self.ts_previous, factor);
        let avg_length = safe_div(session_hours, active as f64);
        let avg_length_prev = safe_div(session_hours_prev, active_prev as f64);
        // Mean daily active users stands in for sessions per user until
        // real session data lands.
        let sessions = mean_active_users(self.ts_current);
        let sessions_prev = mean_active_users(self.ts_previous);

        let reference = self.store.reference_date().unwrap_or(self.window.end);
        let frequency_window = self
            .config
            .windows
            .frequency_window_days
            .map(i64::from)
            .unwrap_or_else(|| self.window.len_days());

        let recent_first = ranking::sorted_by_key(
            self.working,
            ranking::SortDirection::Descending,
            |record| record.last_login,
        );
        let table = views::user_rows(
            &ranking::truncated(&recent_first, USER_TABLE_LIMIT),
            reference,
            frequency_window,
            &self.config.windows,
        );

        UsersView {
            daily_count: daily,
            weekly_count: weekly,
            active_count: active,
            dormant_count: dormant,
            distribution,
            session: SessionMetrics {
                avg_length_hours: avg_length,
                sessions_per_user: sessions,
                length_delta: PeriodDelta::compare(avg_length, avg_length_prev),
                sessions_delta: PeriodDelta::compare(sessions, sessions_prev),
            },
            deltas: UsersDeltas {
                active: PeriodDelta::compare(active as f64, active_prev as f64),
                dormant: PeriodDelta::compare(dormant as f64, dormant_prev as f64),
                daily: PeriodDelta::compare(daily as f64, daily_prev as f64),
                weekly: PeriodDelta::compare(weekly as f64, weekly_prev as f64),
            },
            table,
        }
    }

    fn tenancies(&self) -> TenancyView {
        // Row totals respect the tenancy selection only; the date and the
        // remaining dimension predicates act through the working set.
        let scoped: Vec<UserRecord> = self
            .resolved
            .iter()
            .filter(|record| self.state.tenancy().admits(&record.tenancy))
            .cloned()
            .collect();
        let activity = aggregate::tenancy_rollup(&scoped, self.working);

        let licences = filters::apply_licences(self.store.licences(), self.state);
        let licence_rows = aggregate::licence_rollup(&licences, self.working);

        let mut table: Vec<TenancyRow> = activity
            .into_iter()
            .map(|a| TenancyRow {
                tenancy: a.tenancy,
                total_users: a.total_users,
                active_users: a.active_users,
                assigned_connect: 0,
                active_connect: a.connect_active,
                assigned_workbench: 0,
                active_workbench: a.workbench_active,
            })
            .collect();
        for usage in licence_rows {
            if let Some(row) = table.iter_mut().find(|row| row.tenancy == usage.tenancy) {
                match usage.component {
                    Component::Connect => row.assigned_connect = usage.assigned,
                    Component::Workbench => row.assigned_workbench = usage.assigned,
                }
            }
        }

        TenancyView { table }
    }
}

fn component_count(records: &[UserRecord], component: Component) -> u64 {
    records
        .iter()
        .filter(|record| record.component == component)
        .count() as u64
}

fn session_hours_total(points: &[TimeSeriesPoint], hours_per_active_user: f64) -> f64 {
    points
        .iter()
        .map(|point| point.session_hours(hours_per_active_user))
        .sum()
}

fn mean_active_users(points: &[TimeSeriesPoint]) -> f64 {
    if points.is_empty() {
        0.0
    } else {
        points.iter().map(|p| p.active_users as f64).sum::<f64>() / points.len() as f64
    }
}

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
