//! Row filters for the enriched tables
//!
//! Filters are expressions evaluated to boolean masks with Arrow compute
//! kernels, combined by sequential AND.

pub mod core;
pub mod expr;
pub mod selection;

pub use self::core::{AndFilter, BatchFilter, IncludeAllFilter, filter_record_batch};
pub use expr::{Expr, ExpressionFilter, LiteralValue};
pub use selection::{
    ALL_CONTINENTS, ContinentSelection, FilterOptions, FilterSelection, FilteredViews,
    MISSING_STATUS, apply_filters, parse_status, status_label,
};
