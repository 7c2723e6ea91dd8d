//! Utilities for working with Arrow arrays.
//!
//! Typed column access with errors that name the offending column.

use arrow::array::{Array, ArrayRef, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;

use crate::error::{DashboardError, Result};

/// Get a column from a record batch by name
///
/// # Returns
///
/// * `Ok(&ArrayRef)` - The column array
/// * `Err(DashboardError::ColumnNotFound)` - If the batch has no such column
pub fn get_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(column_name)
        .map_err(|_| DashboardError::ColumnNotFound {
            column: column_name.to_string(),
        })?;
    Ok(batch.column(idx))
}

/// Downcast a column to a specific array type with clear error messages
///
/// # Type Parameters
///
/// * `A` - The target array type to downcast to
///
/// # Arguments
///
/// * `array` - The array reference to downcast
/// * `column_name` - The name of the column (for error messages)
/// * `expected_type_name` - A human-readable name of the expected type (for error messages)
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| DashboardError::InvalidDataType {
            column: column_name.to_string(),
            expected: expected_type_name.to_string(),
        })
}

/// Get an Int64 column by name
pub fn int64_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a Int64Array> {
    downcast_array::<Int64Array>(get_column(batch, column_name)?, column_name, "Int64")
}

/// Get a Utf8 column by name
pub fn string_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a StringArray> {
    downcast_array::<StringArray>(get_column(batch, column_name)?, column_name, "Utf8")
}
