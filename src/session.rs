//! Re-run-on-change session
//!
//! A [`Session`] holds the cached tables and the current control values.
//! Each accepted [`Command`] changes one control and re-renders the whole
//! dashboard from the cached snapshot.

use std::str::FromStr;

use crate::cache::TableCache;
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::filter::{ContinentSelection, FilterSelection, parse_status};
use crate::loader::TableSource;
use crate::presentation::{Dashboard, render};

/// A change to one control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the status selection; no values selects nothing
    Status(Vec<Option<String>>),
    Age(i64, i64),
    Continent(ContinentSelection),
    Top(usize),
    /// Go back to the initial selection
    Reset,
    /// Drop the cached tables and read the store again
    Reload,
}

impl FromStr for Command {
    type Err = DashboardError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, rest)| (name, rest.trim()));

        match name {
            "status" => Ok(Self::Status(
                rest.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(parse_status)
                    .collect(),
            )),
            "age" => {
                let bounds: Vec<i64> = rest
                    .split_whitespace()
                    .map(|v| {
                        v.parse()
                            .map_err(|_| DashboardError::Command(format!("'{v}' is not an age")))
                    })
                    .collect::<Result<_>>()?;
                match bounds.as_slice() {
                    [lo, hi] => Ok(Self::Age(*lo, *hi)),
                    _ => Err(DashboardError::Command(
                        "age expects two values: age MIN MAX".to_string(),
                    )),
                }
            }
            "continent" if !rest.is_empty() => Ok(Self::Continent(ContinentSelection::parse(rest))),
            "continent" => Err(DashboardError::Command(
                "continent expects a name or All".to_string(),
            )),
            "top" => rest
                .parse()
                .map(Self::Top)
                .map_err(|_| DashboardError::Command(format!("'{rest}' is not an airport count"))),
            "reset" => Ok(Self::Reset),
            "reload" => Ok(Self::Reload),
            "" => Err(DashboardError::Command("empty command".to_string())),
            other => Err(DashboardError::Command(format!("unknown command '{other}'"))),
        }
    }
}

pub struct Session<S: TableSource> {
    source: S,
    config: DashboardConfig,
    cache: TableCache,
    selection: Option<FilterSelection>,
}

impl<S: TableSource> Session<S> {
    pub fn new(source: S, config: DashboardConfig) -> Self {
        Self {
            source,
            config,
            cache: TableCache::new(),
            selection: None,
        }
    }

    /// Start from an explicit selection instead of the data-derived defaults
    #[must_use]
    pub fn with_selection(mut self, selection: FilterSelection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Render with the current selection; the first call fixes the defaults
    pub fn render(&mut self) -> Result<Dashboard> {
        let loaded = self.cache.get_or_load(&self.source);
        let dashboard = render(&loaded, self.selection.as_ref(), &self.config)?;
        if let Some(controls) = &dashboard.controls {
            self.selection = Some(controls.selection.clone());
        }
        Ok(dashboard)
    }

    /// Apply a command and re-render
    pub fn apply(&mut self, command: Command) -> Result<Dashboard> {
        match command {
            Command::Reload => self.cache.invalidate(),
            Command::Reset => self.selection = None,
            change => {
                let mut selection = match self.selection.clone() {
                    Some(selection) => selection,
                    None => match self.render()?.controls {
                        Some(controls) => controls.selection,
                        // Nothing to filter; show the halted dashboard again
                        None => return self.render(),
                    },
                };
                match change {
                    Command::Status(statuses) => selection.statuses = statuses,
                    Command::Age(lo, hi) => selection.age_range = (lo, hi),
                    Command::Continent(continent) => selection.continent = continent,
                    Command::Top(count) => selection.airport_count = count,
                    Command::Reset | Command::Reload => {}
                }
                self.selection = Some(selection);
            }
        }
        self.render()
    }

    #[must_use]
    pub const fn selection(&self) -> Option<&FilterSelection> {
        self.selection.as_ref()
    }

    #[must_use]
    pub const fn cache(&self) -> &TableCache {
        &self.cache
    }
}
