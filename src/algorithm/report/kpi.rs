//! Scalar KPIs for the dashboard header

use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use serde::Serialize;

use crate::algorithm::report::{percentage, round_to};
use crate::error::Result;
use crate::filter::FilteredViews;
use crate::schema::columns::{AGE, FLIGHT_STATUS};
use crate::utils::{int64_column, string_column};

pub const DELAYED: &str = "Delayed";
pub const CANCELLED: &str = "Cancelled";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiBlock {
    /// Passengers before the age filter
    pub total_passengers: usize,
    pub filtered_passengers: usize,
    pub filtered_flights: usize,
    /// Mean age of the filtered passengers to one decimal, 0 when there are none
    pub mean_age: f64,
    /// Share of filtered flights with status exactly "Delayed", to two decimals
    pub delayed_percentage: f64,
    /// Share of filtered flights with status exactly "Cancelled", to two decimals
    pub cancelled_percentage: f64,
}

pub fn compute_kpis(passenger_summary: &RecordBatch, views: &FilteredViews) -> Result<KpiBlock> {
    let filtered_flights = views.flights.num_rows();

    Ok(KpiBlock {
        total_passengers: passenger_summary.num_rows(),
        filtered_passengers: views.passengers.num_rows(),
        filtered_flights,
        mean_age: round_to(mean_age(&views.passengers)?, 1),
        delayed_percentage: round_to(
            percentage(count_status(&views.flights, DELAYED)?, filtered_flights),
            2,
        ),
        cancelled_percentage: round_to(
            percentage(count_status(&views.flights, CANCELLED)?, filtered_flights),
            2,
        ),
    })
}

fn mean_age(passengers: &RecordBatch) -> Result<f64> {
    let ages = int64_column(passengers, AGE)?;
    let present = ages.len() - ages.null_count();
    if present == 0 {
        return Ok(0.0);
    }
    let total: i64 = ages.iter().flatten().sum();
    Ok(total as f64 / present as f64)
}

fn count_status(flights: &RecordBatch, status: &str) -> Result<usize> {
    Ok(string_column(flights, FLIGHT_STATUS)?
        .iter()
        .filter(|s| *s == Some(status))
        .count())
}
