//! Left joins that add descriptive fields to flights and passengers
//!
//! Both joins keep every row of the left table. Unmatched flights get null
//! airport fields; unmatched passengers get `FlightsTaken = 0`.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Int64Array, UInt32Array};
use arrow::compute::take;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::loader::BaseTables;
use crate::schema::columns::{AIRPORT_ID, AIRPORT_NAME, CONTINENTS, FLIGHTS_TAKEN, PASSENGER_ID};
use crate::schema::{enriched_flight_schema, passenger_summary_schema};
use crate::utils::{get_column, int64_column};

/// Flights joined with their airport, and passengers joined with their flight counts
#[derive(Debug, Clone)]
pub struct EnrichedTables {
    /// Every base passenger with a non-null `FlightsTaken`
    pub passenger_summary: RecordBatch,
    /// Every base flight with `AirportName` and `Continents`
    pub flights: RecordBatch,
    /// The airport table, kept for the continent options
    pub airports: RecordBatch,
}

impl EnrichedTables {
    pub fn from_base(tables: &BaseTables) -> Result<Self> {
        Ok(Self {
            passenger_summary: summarize_passengers(
                &tables.passengers,
                &tables.passenger_flight_counts,
            )?,
            flights: enrich_flights(&tables.flights, &tables.airports)?,
            airports: tables.airports.clone(),
        })
    }
}

/// Row position as a `take` index
fn take_index(row: usize) -> Result<u32> {
    u32::try_from(row).map_err(|_| {
        ArrowError::InvalidArgumentError(format!("Row {row} exceeds the u32 take index range"))
            .into()
    })
}

/// Index of the first row holding each key; later duplicates are ignored
fn first_row_by_key(keys: &Int64Array) -> Result<FxHashMap<i64, u32>> {
    let mut index = FxHashMap::default();
    for (row, key) in keys.iter().enumerate() {
        if let Some(key) = key {
            if let Entry::Vacant(slot) = index.entry(key) {
                slot.insert(take_index(row)?);
            }
        }
    }
    Ok(index)
}

/// Left join `flights` with `airports` on `AirportID`
pub fn enrich_flights(flights: &RecordBatch, airports: &RecordBatch) -> Result<RecordBatch> {
    let airport_rows = first_row_by_key(int64_column(airports, AIRPORT_ID)?)?;

    // A null index makes `take` produce a null, which is what an unmatched row needs
    let indices: UInt32Array = int64_column(flights, AIRPORT_ID)?
        .iter()
        .map(|id| id.and_then(|id| airport_rows.get(&id).copied()))
        .collect();

    let mut columns: Vec<ArrayRef> = flights.columns().to_vec();
    for name in [AIRPORT_NAME, CONTINENTS] {
        columns.push(take(get_column(airports, name)?, &indices, None)?);
    }

    let unmatched = indices.null_count();
    if unmatched > 0 {
        log::warn!("{unmatched} flights reference an unknown airport");
    }

    Ok(RecordBatch::try_new(enriched_flight_schema(), columns)?)
}

/// Left join `passengers` with their flight counts on `PassengerID`, missing counts become 0
pub fn summarize_passengers(
    passengers: &RecordBatch,
    counts: &RecordBatch,
) -> Result<RecordBatch> {
    let count_ids = int64_column(counts, PASSENGER_ID)?;
    let count_values = int64_column(counts, FLIGHTS_TAKEN)?;

    let mut flights_by_passenger: FxHashMap<i64, i64> = FxHashMap::default();
    for (id, taken) in count_ids.iter().zip(count_values.iter()) {
        if let Some(id) = id {
            flights_by_passenger
                .entry(id)
                .or_insert_with(|| taken.unwrap_or(0).max(0));
        }
    }

    let flights_taken: Int64Array = int64_column(passengers, PASSENGER_ID)?
        .iter()
        .map(|id| {
            Some(
                id.and_then(|id| flights_by_passenger.get(&id).copied())
                    .unwrap_or(0),
            )
        })
        .collect();

    let mut columns: Vec<ArrayRef> = passengers.columns().to_vec();
    columns.push(Arc::new(flights_taken));

    Ok(RecordBatch::try_new(passenger_summary_schema(), columns)?)
}
