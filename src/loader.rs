//! Loading the airline tables from the backing store
//!
//! The loader reads four fixed tables once per cache lifetime. A failed read
//! never propagates: [`load_tables`] turns it into a user-facing message plus
//! four empty tables of the right shape.

use std::path::{Path, PathBuf};
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use sea_orm::sqlx::ConnectOptions;
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sea_orm::{
    DatabaseConnection, DbBackend, DbErr, FromQueryResult, RuntimeErr, SqlxSqliteConnector,
    Statement,
};

use crate::config::DashboardConfig;
use crate::error::util::validate_file;
use crate::error::{DashboardError, Result};
use crate::models::{Airport, ArrowTable, Flight, Passenger, PassengerFlightCount};
use crate::schema::{
    airport_schema, empty_batch, flight_schema, passenger_flight_count_schema, passenger_schema,
};
use crate::utils::logging::{log_operation_complete, log_operation_start};

const PASSENGER_QUERY: &str = "SELECT PassengerID, Age, Gender, Nationality FROM Passenger;";

const FLIGHT_QUERY: &str = "SELECT FlightID, AirportID, FlightStatus, DepartureMonth, DepartureYear \
     FROM Flight WHERE DepartureYear = ?;";

const AIRPORT_QUERY: &str = "SELECT AirportID, AirportName, Continents FROM Airport;";

const PASSENGER_FLIGHT_COUNT_QUERY: &str = "SELECT PassengerID, COUNT(*) AS FlightsTaken \
     FROM PassengerFlight GROUP BY PassengerID;";

/// The four base tables as loaded from the store
#[derive(Debug, Clone)]
pub struct BaseTables {
    pub passengers: RecordBatch,
    pub flights: RecordBatch,
    pub airports: RecordBatch,
    pub passenger_flight_counts: RecordBatch,
}

impl BaseTables {
    /// Four zero-row tables with the base schemas
    #[must_use]
    pub fn empty() -> Self {
        Self {
            passengers: empty_batch(passenger_schema()),
            flights: empty_batch(flight_schema()),
            airports: empty_batch(airport_schema()),
            passenger_flight_counts: empty_batch(passenger_flight_count_schema()),
        }
    }

    /// Build the tables from typed records
    pub fn from_records(
        passengers: &[Passenger],
        flights: &[Flight],
        airports: &[Airport],
        passenger_flight_counts: &[PassengerFlightCount],
    ) -> Result<Self> {
        Ok(Self {
            passengers: Passenger::to_record_batch(passengers)?,
            flights: Flight::to_record_batch(flights)?,
            airports: Airport::to_record_batch(airports)?,
            passenger_flight_counts: PassengerFlightCount::to_record_batch(
                passenger_flight_counts,
            )?,
        })
    }

    fn batches(&self) -> [&RecordBatch; 4] {
        [
            &self.passengers,
            &self.flights,
            &self.airports,
            &self.passenger_flight_counts,
        ]
    }

    /// True when at least one table has no rows; the dashboard cannot be drawn
    #[must_use]
    pub fn any_empty(&self) -> bool {
        self.batches().iter().any(|b| b.num_rows() == 0)
    }

    #[must_use]
    pub fn all_empty(&self) -> bool {
        self.batches().iter().all(|b| b.num_rows() == 0)
    }

    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.batches().iter().map(|b| b.num_rows()).sum()
    }
}

/// Result of a load: the tables plus the message to show if the read failed
#[derive(Debug, Clone)]
pub struct LoadedTables {
    pub locator: String,
    pub tables: BaseTables,
    pub error: Option<String>,
}

/// A store the base tables can be read from
pub trait TableSource {
    /// Identifies the store; loads are cached per locator
    fn locator(&self) -> String;

    /// Read all four tables
    fn fetch(&self) -> Result<BaseTables>;
}

/// Read the base tables, mapping any failure to empty tables and an error message
pub fn load_tables(source: &dyn TableSource) -> LoadedTables {
    let locator = source.locator();
    log_operation_start("Loading airline tables from", &locator);
    let start = Instant::now();

    match source.fetch() {
        Ok(tables) => {
            log_operation_complete(
                "loaded",
                &locator,
                tables.total_rows(),
                Some(start.elapsed()),
            );
            LoadedTables {
                locator,
                tables,
                error: None,
            }
        }
        Err(e) => {
            log::error!("Failed to load tables from {locator}: {e}");
            LoadedTables {
                locator,
                tables: BaseTables::empty(),
                error: Some(format!("Error loading data: {e}")),
            }
        }
    }
}

/// SQLite database file holding the airline tables
#[derive(Debug, Clone)]
pub struct SqliteSource {
    path: PathBuf,
    departure_year: i64,
}

impl SqliteSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            departure_year: DashboardConfig::default().departure_year,
        }
    }

    #[must_use]
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.database_path.clone()).with_departure_year(config.departure_year)
    }

    #[must_use]
    pub const fn with_departure_year(mut self, year: i64) -> Self {
        self.departure_year = year;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file read-only so that a missing file fails instead of creating
    /// an empty database. The path is passed as a filename, never through a URL.
    async fn connect(&self) -> Result<DatabaseConnection> {
        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .read_only(true)
            .disable_statement_logging();
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| DbErr::Conn(RuntimeErr::Internal(e.to_string())))?;
        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// Read all four tables on the caller's runtime
    ///
    /// The connection is closed before returning, whether or not the queries succeeded.
    pub async fn fetch_async(&self) -> Result<BaseTables> {
        validate_file(&self.path, "loading airline tables")?;

        let conn = self.connect().await?;

        let result = self.query_tables(&conn).await;

        if let Err(e) = conn.close().await {
            log::warn!("Failed to close database {}: {e}", self.path.display());
        }

        result
    }

    async fn query_tables(&self, conn: &DatabaseConnection) -> Result<BaseTables> {
        let passengers = Passenger::find_by_statement(Statement::from_string(
            DbBackend::Sqlite,
            PASSENGER_QUERY,
        ))
        .all(conn)
        .await?;

        let flights = Flight::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            FLIGHT_QUERY,
            [self.departure_year.into()],
        ))
        .all(conn)
        .await?;

        let airports =
            Airport::find_by_statement(Statement::from_string(DbBackend::Sqlite, AIRPORT_QUERY))
                .all(conn)
                .await?;

        let counts = PassengerFlightCount::find_by_statement(Statement::from_string(
            DbBackend::Sqlite,
            PASSENGER_FLIGHT_COUNT_QUERY,
        ))
        .all(conn)
        .await?;

        log::debug!(
            "Read {} passengers, {} flights in {}, {} airports, {} flight counts",
            passengers.len(),
            flights.len(),
            self.departure_year,
            airports.len(),
            counts.len()
        );

        BaseTables::from_records(&passengers, &flights, &airports, &counts)
    }
}

impl TableSource for SqliteSource {
    fn locator(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<BaseTables> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                DashboardError::io_error_with_source("Failed to start database runtime", e)
            })?;
        runtime.block_on(self.fetch_async())
    }
}

/// Tables already held in memory, for embedding and tests
#[derive(Debug, Clone)]
pub struct MemorySource {
    locator: String,
    tables: BaseTables,
}

impl MemorySource {
    #[must_use]
    pub fn new(locator: impl Into<String>, tables: BaseTables) -> Self {
        Self {
            locator: locator.into(),
            tables,
        }
    }
}

impl TableSource for MemorySource {
    fn locator(&self) -> String {
        self.locator.clone()
    }

    fn fetch(&self) -> Result<BaseTables> {
        Ok(self.tables.clone())
    }
}
