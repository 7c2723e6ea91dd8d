//! Core filtering functionality
//!
//! This module defines the batch filter trait and the sequential AND
//! combinator the dashboard filters are built from.

use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray};
use arrow::compute::filter as arrow_filter;
use arrow::record_batch::RecordBatch;

use crate::error::{DashboardError, Result};

/// Filter a record batch based on a boolean mask
///
/// Rows where the mask is false or null are dropped.
///
/// # Errors
/// Returns an error if the mask length differs from the batch row count
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return Err(DashboardError::filter_error(format!(
            "Mask length ({}) doesn't match batch row count ({})",
            mask.len(),
            batch.num_rows()
        )));
    }

    let filtered_columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| arrow_filter(col, mask))
        .collect::<arrow::error::Result<_>>()?;

    Ok(RecordBatch::try_new(batch.schema(), filtered_columns)?)
}

/// Trait for objects that can filter record batches
pub trait BatchFilter: std::fmt::Debug {
    /// Filter a record batch
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch>;
}

/// A filter that always includes all rows
#[derive(Debug, Clone, Default)]
pub struct IncludeAllFilter;

impl BatchFilter for IncludeAllFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        Ok(batch.clone())
    }
}

/// A filter that combines multiple filters with a logical AND
///
/// Filters run in order and each one sees only the rows the previous ones kept.
#[derive(Debug, Clone)]
pub struct AndFilter {
    filters: Vec<Arc<dyn BatchFilter + Send + Sync>>,
}

impl AndFilter {
    /// Create a new AND filter
    #[must_use]
    pub fn new(filters: Vec<Arc<dyn BatchFilter + Send + Sync>>) -> Self {
        Self { filters }
    }

    /// Apply the filters in order, calling `inspect` with each intermediate result
    pub fn filter_with(
        &self,
        batch: &RecordBatch,
        mut inspect: impl FnMut(usize, &RecordBatch),
    ) -> Result<RecordBatch> {
        let mut result_batch = batch.clone();

        for (step, filter) in self.filters.iter().enumerate() {
            result_batch = filter.filter(&result_batch)?;
            inspect(step, &result_batch);
        }

        Ok(result_batch)
    }
}

impl BatchFilter for AndFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        self.filter_with(batch, |_, _| {})
    }
}
