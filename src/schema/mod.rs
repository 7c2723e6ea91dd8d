//! Arrow schemas for the base and derived tables.
//!
//! Column names are the database column names, so a batch read from the
//! store and a batch produced by a join can be addressed the same way.

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, FieldRef, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

/// Column names shared by every table
pub mod columns {
    pub const PASSENGER_ID: &str = "PassengerID";
    pub const AGE: &str = "Age";
    pub const GENDER: &str = "Gender";
    pub const NATIONALITY: &str = "Nationality";

    pub const FLIGHT_ID: &str = "FlightID";
    pub const AIRPORT_ID: &str = "AirportID";
    pub const FLIGHT_STATUS: &str = "FlightStatus";
    pub const DEPARTURE_MONTH: &str = "DepartureMonth";
    pub const DEPARTURE_YEAR: &str = "DepartureYear";

    pub const AIRPORT_NAME: &str = "AirportName";
    pub const CONTINENTS: &str = "Continents";

    pub const FLIGHTS_TAKEN: &str = "FlightsTaken";
}

use columns::*;

fn passenger_fields() -> Vec<Field> {
    vec![
        Field::new(PASSENGER_ID, DataType::Int64, false),
        Field::new(AGE, DataType::Int64, true),
        Field::new(GENDER, DataType::Utf8, true),
        Field::new(NATIONALITY, DataType::Utf8, true),
    ]
}

fn flight_fields() -> Vec<Field> {
    vec![
        Field::new(FLIGHT_ID, DataType::Int64, false),
        Field::new(AIRPORT_ID, DataType::Int64, true),
        Field::new(FLIGHT_STATUS, DataType::Utf8, true),
        Field::new(DEPARTURE_MONTH, DataType::Int64, false),
        Field::new(DEPARTURE_YEAR, DataType::Int64, false),
    ]
}

/// Fields the airport table contributes to an enriched flight
fn airport_detail_fields() -> Vec<Field> {
    vec![
        Field::new(AIRPORT_NAME, DataType::Utf8, true),
        Field::new(CONTINENTS, DataType::Utf8, true),
    ]
}

/// Passenger table: `PassengerID, Age, Gender, Nationality`
#[must_use]
pub fn passenger_schema() -> SchemaRef {
    Arc::new(Schema::new(passenger_fields()))
}

/// Flight table: `FlightID, AirportID, FlightStatus, DepartureMonth, DepartureYear`
#[must_use]
pub fn flight_schema() -> SchemaRef {
    Arc::new(Schema::new(flight_fields()))
}

/// Airport table: `AirportID, AirportName, Continents`
#[must_use]
pub fn airport_schema() -> SchemaRef {
    let mut fields = vec![Field::new(AIRPORT_ID, DataType::Int64, false)];
    fields.extend(airport_detail_fields());
    Arc::new(Schema::new(fields))
}

/// Per-passenger flight counts: `PassengerID, FlightsTaken`
#[must_use]
pub fn passenger_flight_count_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(PASSENGER_ID, DataType::Int64, false),
        Field::new(FLIGHTS_TAKEN, DataType::Int64, false),
    ]))
}

/// Flight columns followed by the airport's name and continent
#[must_use]
pub fn enriched_flight_schema() -> SchemaRef {
    let mut fields = flight_fields();
    fields.extend(airport_detail_fields());
    Arc::new(Schema::new(fields))
}

/// Passenger columns followed by a non-null `FlightsTaken`
#[must_use]
pub fn passenger_summary_schema() -> SchemaRef {
    let mut fields = passenger_fields();
    fields.push(Field::new(FLIGHTS_TAKEN, DataType::Int64, false));
    Arc::new(Schema::new(fields))
}

/// Schema fields in the form `serde_arrow` expects
#[must_use]
pub fn field_refs(schema: &Schema) -> Vec<FieldRef> {
    schema.fields().iter().map(Arc::clone).collect()
}

/// A zero-row batch that still carries the table's columns
#[must_use]
pub fn empty_batch(schema: SchemaRef) -> RecordBatch {
    RecordBatch::new_empty(schema)
}
