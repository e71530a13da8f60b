//! Period comparison windows and percentage deltas

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::models::FilterState;

/// An inclusive date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day of the window
    pub start: NaiveDate,
    /// Last day of the window, inclusive
    pub end: NaiveDate,
}

impl DateWindow {
    /// Build a window from explicit bounds
    ///
    /// Callers hand over a validated range; `FilterState` enforces
    /// ordering at its boundary.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The current period selected by a filter state
    pub fn of(state: &FilterState) -> Self {
        Self::new(state.start_date(), state.end_date())
    }

    /// Number of days covered, inclusive of both endpoints
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether a date falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The immediately preceding window of identical length
    ///
    /// `comp_end = start - 1 day`, `comp_start = comp_end - (end - start)`.
    /// The two windows share no days and are adjacent.
    pub fn preceding(&self) -> Self {
        let span = self.end - self.start;
        let end = self.start - Duration::days(1);
        Self {
            start: end - span,
            end,
        }
    }
}

/// Percentage change between two period values
///
/// Defined as exactly `0.0` whenever `previous` is zero, regardless of
/// `current`. Empty comparison windows therefore report a flat 0% rather
/// than dividing by zero.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

/// Round a value to one decimal place for display
pub fn round_display(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A metric value paired with its previous-period counterpart
///
/// The change percentage is kept at full precision for chained
/// calculations; rounding happens only at display time via
/// [`PeriodDelta::display_pct`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodDelta {
    /// Value over the current window
    pub current: f64,
    /// Value over the comparison window
    pub previous: f64,
    /// Percentage change at full precision
    pub change_pct: f64,
}

impl PeriodDelta {
    /// Compare a current value against its previous-period counterpart
    pub fn compare(current: f64, previous: f64) -> Self {
        Self {
            current,
            previous,
            change_pct: percent_change(current, previous),
        }
    }

    /// Change percentage rounded to one decimal for display
    pub fn display_pct(&self) -> f64 {
        round_display(self.change_pct)
    }
}
