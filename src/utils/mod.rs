//! Shared helpers for Arrow access and logging.

pub mod arrow_utils;
pub mod logging;

pub use arrow_utils::{downcast_array, get_column, int64_column, string_column};
