//! Typed records for the airline tables.
//!
//! Each record maps one row of a database query and converts to and from
//! Arrow batches through `serde_arrow`, using the fixed schemas in
//! [`crate::schema`].

pub mod records;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::schema::field_refs;

pub use records::{Airport, EnrichedFlight, Flight, Passenger, PassengerFlightCount, PassengerSummary};

/// Records that have a fixed Arrow representation
pub trait ArrowTable: Serialize + DeserializeOwned + Sized {
    /// Get the Arrow schema for this record
    fn schema_ref() -> SchemaRef;

    /// Convert a slice of records to a `RecordBatch`
    fn to_record_batch(records: &[Self]) -> Result<RecordBatch> {
        let schema = Self::schema_ref();
        if records.is_empty() {
            return Ok(RecordBatch::new_empty(schema));
        }
        let fields = field_refs(&schema);
        Ok(serde_arrow::to_record_batch(&fields, &records)?)
    }

    /// Convert a `RecordBatch` back to records
    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        Ok(serde_arrow::from_record_batch(batch)?)
    }
}
