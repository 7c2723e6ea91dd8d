//! Dashboard filter controls and their application
//!
//! Four controls drive a run: a flight-status multi-select, an age range,
//! a continent selector with an "All" sentinel, and the number of airports
//! in the top-N breakdown. The first three are row filters; the airport
//! count only shapes the top-N report.

use std::sync::Arc;

use arrow::compute::{max, min};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::algorithm::enrich::EnrichedTables;
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::filter::core::{AndFilter, BatchFilter, IncludeAllFilter};
use crate::filter::expr::{Expr, ExpressionFilter, LiteralValue};
use crate::schema::columns::{AGE, CONTINENTS, FLIGHT_STATUS};
use crate::utils::logging::log_filter_step;
use crate::utils::{int64_column, string_column};

/// Continent value meaning "no restriction"
pub const ALL_CONTINENTS: &str = "All";

/// Label of the option selecting flights without a recorded status
pub const MISSING_STATUS: &str = "(none)";

/// A status option as typed by a user; [`MISSING_STATUS`] selects null statuses
#[must_use]
pub fn parse_status(value: &str) -> Option<String> {
    (value != MISSING_STATUS).then(|| value.to_string())
}

#[must_use]
pub fn status_label(status: Option<&str>) -> &str {
    status.unwrap_or(MISSING_STATUS)
}

/// Selected continent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ContinentSelection {
    All,
    Only(String),
}

impl ContinentSelection {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == ALL_CONTINENTS {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CONTINENTS,
            Self::Only(name) => name,
        }
    }
}

impl From<String> for ContinentSelection {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ContinentSelection> for String {
    fn from(value: ContinentSelection) -> Self {
        value.label().to_string()
    }
}

/// Current value of every control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Statuses to keep, `None` standing for a missing status; an empty list keeps no flights
    pub statuses: Vec<Option<String>>,
    /// Inclusive `(min, max)` passenger age
    pub age_range: (i64, i64),
    pub continent: ContinentSelection,
    /// Number of airports in the top-N breakdown
    pub airport_count: usize,
}

impl FilterSelection {
    /// Continent restriction, applied to flights first
    #[must_use]
    pub fn continent_filter(&self) -> Arc<dyn BatchFilter + Send + Sync> {
        match &self.continent {
            ContinentSelection::All => Arc::new(IncludeAllFilter),
            ContinentSelection::Only(name) => Arc::new(ExpressionFilter::new(Expr::Eq(
                CONTINENTS.to_string(),
                LiteralValue::String(name.clone()),
            ))),
        }
    }

    /// Status membership, applied to the continent-restricted flights
    #[must_use]
    pub fn status_filter(&self) -> Arc<dyn BatchFilter + Send + Sync> {
        Arc::new(ExpressionFilter::new(Expr::In(
            FLIGHT_STATUS.to_string(),
            self.statuses.clone(),
        )))
    }

    /// Flight filters in application order
    #[must_use]
    pub fn flight_filter(&self) -> AndFilter {
        AndFilter::new(vec![self.continent_filter(), self.status_filter()])
    }

    #[must_use]
    pub fn passenger_filter(&self) -> ExpressionFilter {
        let (lo, hi) = self.age_range;
        ExpressionFilter::new(Expr::between(AGE, lo, hi))
    }
}

/// The values each control can take, derived from the data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Distinct flight statuses in first-seen order, including `None` when
    /// some flights have no status
    pub statuses: Vec<Option<String>>,
    /// Observed `(min, max)` passenger age, `None` when there are no passengers
    pub age_bounds: Option<(i64, i64)>,
    /// `"All"` followed by the distinct airport continents
    pub continents: Vec<String>,
    pub airport_count_range: (usize, usize),
}

impl FilterOptions {
    pub fn from_tables(tables: &EnrichedTables, config: &DashboardConfig) -> Result<Self> {
        let statuses = string_column(&tables.flights, FLIGHT_STATUS)?
            .iter()
            .unique()
            .map(|status| status.map(str::to_string))
            .collect();

        let ages = int64_column(&tables.passenger_summary, AGE)?;
        let age_bounds = min(ages).zip(max(ages));

        let continents = std::iter::once(ALL_CONTINENTS.to_string())
            .chain(
                string_column(&tables.airports, CONTINENTS)?
                    .iter()
                    .flatten()
                    .filter(|c| *c != ALL_CONTINENTS)
                    .unique()
                    .map(str::to_string),
            )
            .collect();

        Ok(Self {
            statuses,
            age_bounds,
            continents,
            airport_count_range: config.airport_count_range,
        })
    }

    /// Initial selection: every status, the configured age range clamped into
    /// the observed ages, all continents, and the default airport count
    #[must_use]
    pub fn default_selection(&self, config: &DashboardConfig) -> FilterSelection {
        let (lo, hi) = config.default_age_range;
        let age_range = match self.age_bounds {
            Some((min_age, max_age)) => (lo.clamp(min_age, max_age), hi.clamp(min_age, max_age)),
            None => (lo, hi),
        };

        FilterSelection {
            statuses: self.statuses.clone(),
            age_range,
            continent: ContinentSelection::All,
            airport_count: self.clamp_airport_count(config.default_airport_count),
        }
    }

    /// Clamp the airport count into its allowed range
    #[must_use]
    pub fn clamp_airport_count(&self, requested: usize) -> usize {
        let (lo, hi) = self.airport_count_range;
        let count = requested.clamp(lo, hi);
        if count != requested {
            log::warn!("Airport count {requested} outside {lo}-{hi}, using {count}");
        }
        count
    }
}

/// Passengers and flights that survive the current selection
#[derive(Debug, Clone)]
pub struct FilteredViews {
    pub passengers: RecordBatch,
    pub flights: RecordBatch,
}

/// Apply the selection's row filters to the enriched tables
///
/// The continent filter runs before the status filter, so statuses are
/// matched only among flights of the selected continent.
pub fn apply_filters(tables: &EnrichedTables, selection: &FilterSelection) -> Result<FilteredViews> {
    let total_flights = tables.flights.num_rows();
    let mut previous = total_flights;
    let flights = selection.flight_filter().filter_with(&tables.flights, |step, batch| {
        let name = if step == 0 { "continent filter" } else { "status filter" };
        log_filter_step(name, previous, batch.num_rows());
        previous = batch.num_rows();
    })?;

    let passengers = selection.passenger_filter().filter(&tables.passenger_summary)?;
    log_filter_step(
        "age filter",
        tables.passenger_summary.num_rows(),
        passengers.num_rows(),
    );

    Ok(FilteredViews { passengers, flights })
}
