//! Group-by reports behind the dashboard charts
//!
//! Rows whose grouping key is null are left out of that grouping.

use std::cmp::Reverse;

use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::Result;
use crate::schema::columns::{
    AGE, AIRPORT_NAME, DEPARTURE_MONTH, FLIGHT_STATUS, FLIGHTS_TAKEN, NATIONALITY,
};
use crate::utils::{int64_column, string_column};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeCount {
    pub age: i64,
    pub passengers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

/// Flight counts of one airport, split by status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirportStatusBreakdown {
    pub airport: String,
    /// Sum of `statuses[..].count`
    pub total: usize,
    /// Ordered by status name
    pub statuses: Vec<StatusCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: i64,
    pub flights: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NationalityFlights {
    pub nationality: String,
    pub flights_taken: i64,
}

/// Passengers per distinct age, ascending by age
pub fn age_distribution(passengers: &RecordBatch) -> Result<Vec<AgeCount>> {
    Ok(int64_column(passengers, AGE)?
        .iter()
        .flatten()
        .counts()
        .into_iter()
        .sorted_unstable()
        .map(|(age, passengers)| AgeCount { age, passengers })
        .collect())
}

/// Per-status flight counts for the `n` airports with the most flights
///
/// Airports are ranked by total flights, descending. The order among airports
/// with equal totals is not part of the contract; this implementation breaks
/// ties by airport name.
pub fn top_airport_status(flights: &RecordBatch, n: usize) -> Result<Vec<AirportStatusBreakdown>> {
    let names = string_column(flights, AIRPORT_NAME)?;
    let statuses = string_column(flights, FLIGHT_STATUS)?;

    let mut by_airport: FxHashMap<&str, FxHashMap<&str, usize>> = FxHashMap::default();
    for (name, status) in names.iter().zip(statuses.iter()) {
        if let (Some(name), Some(status)) = (name, status) {
            *by_airport
                .entry(name)
                .or_default()
                .entry(status)
                .or_default() += 1;
        }
    }

    Ok(by_airport
        .into_iter()
        .map(|(airport, counts)| {
            let statuses: Vec<StatusCount> = counts
                .into_iter()
                .sorted_unstable_by_key(|(status, _)| *status)
                .map(|(status, count)| StatusCount {
                    status: status.to_string(),
                    count,
                })
                .collect();
            AirportStatusBreakdown {
                airport: airport.to_string(),
                total: statuses.iter().map(|s| s.count).sum(),
                statuses,
            }
        })
        .sorted_unstable_by(|a, b| b.total.cmp(&a.total).then_with(|| a.airport.cmp(&b.airport)))
        .take(n)
        .collect())
}

/// Departures per month, ascending; months without flights are absent
pub fn monthly_trend(flights: &RecordBatch) -> Result<Vec<MonthCount>> {
    Ok(int64_column(flights, DEPARTURE_MONTH)?
        .iter()
        .flatten()
        .counts()
        .into_iter()
        .sorted_unstable()
        .map(|(month, flights)| MonthCount { month, flights })
        .collect())
}

/// Nationalities by total flights taken, descending, at most `limit` rows
///
/// Ties are ordered by nationality name.
pub fn nationality_ranking(
    passenger_summary: &RecordBatch,
    limit: usize,
) -> Result<Vec<NationalityFlights>> {
    let nationalities = string_column(passenger_summary, NATIONALITY)?;
    let flights_taken = int64_column(passenger_summary, FLIGHTS_TAKEN)?;

    let mut totals: FxHashMap<&str, i64> = FxHashMap::default();
    for (nationality, taken) in nationalities.iter().zip(flights_taken.iter()) {
        if let Some(nationality) = nationality {
            *totals.entry(nationality).or_default() += taken.unwrap_or(0);
        }
    }

    Ok(totals
        .into_iter()
        .sorted_unstable_by_key(|(nationality, total)| (Reverse(*total), *nationality))
        .take(limit)
        .map(|(nationality, flights_taken)| NationalityFlights {
            nationality: nationality.to_string(),
            flights_taken,
        })
        .collect())
}
