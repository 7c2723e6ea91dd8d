use sea_orm::{DbErr, FromQueryResult, QueryResult};
use serde::{Deserialize, Serialize};

use crate::models::ArrowTable;
use crate::schema::{self, columns::*};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    #[serde(rename = "PassengerID")]
    pub passenger_id: i64,
    #[serde(rename = "Age")]
    pub age: Option<i64>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "Nationality")]
    pub nationality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    #[serde(rename = "FlightID")]
    pub flight_id: i64,
    #[serde(rename = "AirportID")]
    pub airport_id: Option<i64>,
    #[serde(rename = "FlightStatus")]
    pub flight_status: Option<String>,
    #[serde(rename = "DepartureMonth")]
    pub departure_month: i64,
    #[serde(rename = "DepartureYear")]
    pub departure_year: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    #[serde(rename = "AirportID")]
    pub airport_id: i64,
    #[serde(rename = "AirportName")]
    pub airport_name: Option<String>,
    #[serde(rename = "Continents")]
    pub continents: Option<String>,
}

/// Number of flights a passenger has taken; only passengers with at least one flight have a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerFlightCount {
    #[serde(rename = "PassengerID")]
    pub passenger_id: i64,
    #[serde(rename = "FlightsTaken")]
    pub flights_taken: i64,
}

/// A flight with its airport's name and continent, both null when the airport is unknown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedFlight {
    #[serde(rename = "FlightID")]
    pub flight_id: i64,
    #[serde(rename = "AirportID")]
    pub airport_id: Option<i64>,
    #[serde(rename = "FlightStatus")]
    pub flight_status: Option<String>,
    #[serde(rename = "DepartureMonth")]
    pub departure_month: i64,
    #[serde(rename = "DepartureYear")]
    pub departure_year: i64,
    #[serde(rename = "AirportName")]
    pub airport_name: Option<String>,
    #[serde(rename = "Continents")]
    pub continents: Option<String>,
}

/// A passenger with the number of flights taken (zero when none are recorded)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerSummary {
    #[serde(rename = "PassengerID")]
    pub passenger_id: i64,
    #[serde(rename = "Age")]
    pub age: Option<i64>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "Nationality")]
    pub nationality: Option<String>,
    #[serde(rename = "FlightsTaken")]
    pub flights_taken: i64,
}

impl FromQueryResult for Passenger {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            passenger_id: res.try_get(pre, PASSENGER_ID)?,
            age: res.try_get(pre, AGE)?,
            gender: res.try_get(pre, GENDER)?,
            nationality: res.try_get(pre, NATIONALITY)?,
        })
    }
}

impl FromQueryResult for Flight {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            flight_id: res.try_get(pre, FLIGHT_ID)?,
            airport_id: res.try_get(pre, AIRPORT_ID)?,
            flight_status: res.try_get(pre, FLIGHT_STATUS)?,
            departure_month: res.try_get(pre, DEPARTURE_MONTH)?,
            departure_year: res.try_get(pre, DEPARTURE_YEAR)?,
        })
    }
}

impl FromQueryResult for Airport {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            airport_id: res.try_get(pre, AIRPORT_ID)?,
            airport_name: res.try_get(pre, AIRPORT_NAME)?,
            continents: res.try_get(pre, CONTINENTS)?,
        })
    }
}

impl FromQueryResult for PassengerFlightCount {
    fn from_query_result(res: &QueryResult, pre: &str) -> Result<Self, DbErr> {
        Ok(Self {
            passenger_id: res.try_get(pre, PASSENGER_ID)?,
            flights_taken: res.try_get(pre, FLIGHTS_TAKEN)?,
        })
    }
}

impl ArrowTable for Passenger {
    fn schema_ref() -> arrow::datatypes::SchemaRef {
        schema::passenger_schema()
    }
}

impl ArrowTable for Flight {
    fn schema_ref() -> arrow::datatypes::SchemaRef {
        schema::flight_schema()
    }
}

impl ArrowTable for Airport {
    fn schema_ref() -> arrow::datatypes::SchemaRef {
        schema::airport_schema()
    }
}

impl ArrowTable for PassengerFlightCount {
    fn schema_ref() -> arrow::datatypes::SchemaRef {
        schema::passenger_flight_count_schema()
    }
}

impl ArrowTable for EnrichedFlight {
    fn schema_ref() -> arrow::datatypes::SchemaRef {
        schema::enriched_flight_schema()
    }
}

impl ArrowTable for PassengerSummary {
    fn schema_ref() -> arrow::datatypes::SchemaRef {
        schema::passenger_summary_schema()
    }
}
