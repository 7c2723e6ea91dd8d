//! Logging utilities for pipeline stages

pub mod log;

pub use log::{log_filter_step, log_operation_complete, log_operation_start};
