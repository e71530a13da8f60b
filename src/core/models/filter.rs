//! Immutable filter state

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::user::{Component, Environment};
use crate::utils::error::{EngineError, Result};

/// A single-value-or-all selection for one filter dimension
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection<T> {
    /// No restriction on this dimension
    All,
    /// Restrict to exactly one value
    One(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// Whether a value passes this selection
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::One(only) => only == value,
        }
    }
}

/// Immutable filter state driving every computation
///
/// Replaced wholesale on each interaction, never mutated field by field,
/// and never read from ambient scope: every computation takes the state
/// it should answer for. `Hash + Eq` so it can key the snapshot memo
/// cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FilterState {
    tenancy: Selection<String>,
    environment: Selection<Environment>,
    component: Selection<Component>,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl FilterState {
    /// Create a validated filter state
    ///
    /// A range whose start falls after its end is rejected here, before it
    /// can reach the engine.
    pub fn new(
        tenancy: Selection<String>,
        environment: Selection<Environment>,
        component: Selection<Component>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self> {
        if start_date > end_date {
            return Err(EngineError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            tenancy,
            environment,
            component,
            start_date,
            end_date,
        })
    }

    /// Unrestricted dimensions over the given window
    pub fn for_window(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        Self::new(
            Selection::All,
            Selection::All,
            Selection::All,
            start_date,
            end_date,
        )
    }

    /// Tenancy selection
    pub fn tenancy(&self) -> &Selection<String> {
        &self.tenancy
    }

    /// Environment selection
    pub fn environment(&self) -> &Selection<Environment> {
        &self.environment
    }

    /// Component selection
    pub fn component(&self) -> &Selection<Component> {
        &self.component
    }

    /// First day of the selected range, inclusive
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the selected range, inclusive
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }
}
