//! Data transformations between loading and presentation.

pub mod enrich;
pub mod report;

pub use enrich::{EnrichedTables, enrich_flights, summarize_passengers};
