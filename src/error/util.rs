//! Utility functions for error handling
//!
//! Path checks that turn a bare "unable to open database file" into
//! something a user can act on.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{DashboardError, Result};

/// Check that a file exists and is readable, with rich error information
///
/// # Arguments
/// * `path` - The path to the file
/// * `purpose` - Why the file is being opened (for error context)
pub fn validate_file(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(
            DashboardError::io_error(format!("File not found, needed for {purpose}"))
                .with_path(path),
        );
    }

    if !path.is_file() {
        return Err(DashboardError::io_error(format!(
            "Path is not a file, expected a file for {purpose}"
        ))
        .with_path(path));
    }

    match fs::File::open(path) {
        Ok(_) => Ok(()),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::PermissionDenied => {
                    "Permission denied - check file permissions".to_string()
                }
                _ => format!("Failed to open file for {purpose}"),
            };

            Err(DashboardError::io_error_with_source(context, e).with_path(path))
        }
    }
}
