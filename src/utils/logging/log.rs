//! Logging utilities
//!
//! This module provides standardized logging functions for operations.

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `target` - The locator or table being operated on
pub fn log_operation_start(operation: &str, target: &str) {
    log::info!("{operation} {target}");
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `target` - The locator or table that was operated on
/// * `items` - Number of rows processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    target: &str,
    items: usize,
    elapsed: Option<std::time::Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!("Successfully {operation} {items} rows from {target} in {duration:?}");
    } else {
        log::info!("Successfully {operation} {items} rows from {target}");
    }
}

/// Log the row count surviving a filter step
pub fn log_filter_step(step: &str, before: usize, after: usize) {
    log::debug!("{step}: {before} -> {after} rows");
}
