//! A filter-and-aggregate dashboard over an airline operations database.
//!
//! The pipeline runs Loader → Enrichment → Filter → Reports → Presentation.
//! Base tables are loaded once and cached; everything after the load is
//! recomputed from the cached snapshot on every run.

pub mod algorithm;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod presentation;
pub mod schema;
pub mod session;
pub mod utils;

// Re-export the most common types for easier use
pub use cache::TableCache;
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use loader::{BaseTables, LoadedTables, MemorySource, SqliteSource, TableSource, load_tables};
pub use session::{Command, Session};

// Pipeline stages
pub use algorithm::EnrichedTables;
pub use filter::{ContinentSelection, FilterOptions, FilterSelection, FilteredViews, apply_filters};
pub use presentation::{Block, Dashboard, Presenter, render};

// Arrow types
pub use arrow::record_batch::RecordBatch;
