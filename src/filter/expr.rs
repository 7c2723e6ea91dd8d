//! Expression-based filtering
//!
//! This module provides an expression-based filtering system that
//! allows filtering Arrow record batches based on column values.

use arrow::array::{BooleanArray, Int64Array, Scalar, StringArray};
use arrow::compute::and;
use arrow::compute::kernels::cmp::{eq, gt_eq, lt_eq};
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashSet;

use crate::error::{DashboardError, Result};
use crate::filter::core::{BatchFilter, filter_record_batch};
use crate::utils::{get_column, string_column};

/// Represents a filter expression over the columns of a batch
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column equals a literal value
    Eq(String, LiteralValue),

    /// Column is greater than or equal to a literal value
    GtEq(String, LiteralValue),

    /// Column is less than or equal to a literal value
    LtEq(String, LiteralValue),

    /// String column is in a set of values; a `None` entry matches null cells
    /// and an empty set matches nothing
    In(String, Vec<Option<String>>),

    /// Logical AND of expressions
    And(Vec<Expr>),
}

/// Represents a literal value that can be used in filter expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    /// Integer value
    Int(i64),

    /// String value
    String(String),
}

#[derive(Debug, Clone, Copy)]
enum Comparison {
    Eq,
    GtEq,
    LtEq,
}

impl Expr {
    /// `lo <= column <= hi`
    #[must_use]
    pub fn between(column: &str, lo: i64, hi: i64) -> Self {
        Self::And(vec![
            Self::GtEq(column.to_string(), LiteralValue::Int(lo)),
            Self::LtEq(column.to_string(), LiteralValue::Int(hi)),
        ])
    }

    /// Evaluate this expression to a row mask; null entries mean "no match"
    pub fn evaluate(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        match self {
            Self::Eq(col, value) => evaluate_comparison(batch, col, value, Comparison::Eq),
            Self::GtEq(col, value) => evaluate_comparison(batch, col, value, Comparison::GtEq),
            Self::LtEq(col, value) => evaluate_comparison(batch, col, value, Comparison::LtEq),
            Self::In(col, values) => evaluate_in(batch, col, values),
            Self::And(exprs) => {
                let mut result = BooleanArray::from(vec![true; batch.num_rows()]);
                for expr in exprs {
                    result = and(&result, &expr.evaluate(batch)?)?;
                }
                Ok(result)
            }
        }
    }
}

fn evaluate_comparison(
    batch: &RecordBatch,
    col_name: &str,
    literal: &LiteralValue,
    comparison: Comparison,
) -> Result<BooleanArray> {
    let column = get_column(batch, col_name)?;

    let kernel = match comparison {
        Comparison::Eq => eq,
        Comparison::GtEq => gt_eq,
        Comparison::LtEq => lt_eq,
    };

    let result = match literal {
        LiteralValue::Int(n) => kernel(column, &Scalar::new(Int64Array::from(vec![*n]))),
        LiteralValue::String(s) => kernel(column, &Scalar::new(StringArray::from(vec![s.as_str()]))),
    };

    result.map_err(|e| {
        DashboardError::filter_error(format!(
            "Cannot compare column '{col_name}' with {literal:?}: {e}"
        ))
    })
}

fn evaluate_in(
    batch: &RecordBatch,
    col_name: &str,
    values: &[Option<String>],
) -> Result<BooleanArray> {
    let strings = string_column(batch, col_name)?;
    let wanted: FxHashSet<Option<&str>> = values.iter().map(Option::as_deref).collect();
    Ok(strings.iter().map(|v| Some(wanted.contains(&v))).collect())
}

/// A filter that evaluates an expression against a record batch
#[derive(Debug, Clone)]
pub struct ExpressionFilter {
    expr: Expr,
}

impl ExpressionFilter {
    #[must_use]
    pub const fn new(expr: Expr) -> Self {
        Self { expr }
    }
}

impl BatchFilter for ExpressionFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let mask = self.expr.evaluate(batch)?;
        filter_record_batch(batch, &mask)
    }
}
