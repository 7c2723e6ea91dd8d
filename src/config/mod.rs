//! Configuration for the dashboard.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::util::validate_file;
use crate::error::{DashboardError, Result};

/// Configuration for the dashboard
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Location of the SQLite database
    pub database_path: PathBuf,
    /// Only flights departing in this year are loaded
    pub departure_year: i64,
    /// Initial age range selection, clamped into the observed ages
    pub default_age_range: (i64, i64),
    /// Inclusive bounds for the number of airports in the top-N breakdown
    pub airport_count_range: (usize, usize),
    /// Initial number of airports in the top-N breakdown
    pub default_airport_count: usize,
    /// Number of nationalities kept in the ranking
    pub nationality_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("airline_database_111.db"),
            departure_year: 2022,
            default_age_range: (20, 60),
            airport_count_range: (5, 10),
            default_airport_count: 10,
            nationality_limit: 10,
        }
    }
}

impl DashboardConfig {
    /// Load configuration overrides from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        validate_file(path, "reading configuration")?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::io_error_with_source("Failed to read config", e).with_path(path)
        })?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| DashboardError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Reject configurations that cannot produce a usable dashboard
    pub fn validate(&self) -> Result<()> {
        let (lo, hi) = self.airport_count_range;
        if lo == 0 || lo > hi {
            return Err(DashboardError::Config(format!(
                "airport_count_range must satisfy 0 < min <= max, got ({lo}, {hi})"
            )));
        }
        if !(lo..=hi).contains(&self.default_airport_count) {
            return Err(DashboardError::Config(format!(
                "default_airport_count {} is outside ({lo}, {hi})",
                self.default_airport_count
            )));
        }
        if self.default_age_range.0 > self.default_age_range.1 {
            return Err(DashboardError::Config(format!(
                "default_age_range is inverted: {:?}",
                self.default_age_range
            )));
        }
        Ok(())
    }
}
