//! The presentation boundary
//!
//! [`render`] is the per-run function: it takes the cached tables and the
//! current control values and returns a [`Dashboard`], an ordered list of
//! blocks any [`Presenter`] can draw. Rendering has no side effects beyond
//! logging, so a UI runtime may call it on every control change.

pub mod chart;
pub mod console;

use serde::Serialize;

use crate::algorithm::enrich::EnrichedTables;
use crate::algorithm::report::{
    KpiBlock, age_distribution, compute_kpis, monthly_trend, nationality_ranking,
    top_airport_status,
};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::filter::{FilterOptions, FilterSelection, apply_filters};
use crate::loader::LoadedTables;

pub use chart::{AxisValue, ChartKind, ChartSpec, Point, Series};
pub use console::ConsolePresenter;

pub const TITLE: &str = "Airline Data Interactive Dashboard";
pub const SUBTITLE: &str = "Explore insights from airline data interactively.";
pub const FOOTER_RULE: &str = "---";
pub const CREDIT: &str = "**Dashboard Created by Vardhan Burande** | Powered by airline-dash";
pub const NO_DATA_MESSAGE: &str = "No data available to display. Please check your database.";

pub const KPI_SECTION: &str = "Key Performance Indicators";
pub const AGE_SECTION: &str = "Passenger Age Distribution";
pub const AIRPORT_SECTION: &str = "Flight Status by Top Airports";
pub const MONTHLY_SECTION: &str = "Monthly Trends in Flight Departures";
pub const NATIONALITY_SECTION: &str = "Flights Taken by Nationality";

pub const NO_AGE_DATA: &str = "No passengers available in the selected age range.";
pub const NO_AIRPORT_DATA: &str = "No data available for the selected filters.";
pub const NO_MONTHLY_DATA: &str = "No monthly flight trends available.";
pub const NO_NATIONALITY_DATA: &str = "No flight data by nationality available.";

/// Value of a single KPI
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum KpiValue {
    Count(usize),
    Decimal(f64),
    Percent(f64),
}

impl std::fmt::Display for KpiValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Decimal(v) => write!(f, "{v:.1}"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    pub label: String,
    pub value: KpiValue,
}

impl Kpi {
    fn new(label: &str, value: KpiValue) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Control domains together with their current values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub options: FilterOptions,
    pub selection: FilterSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Block {
    Title(String),
    Markdown(String),
    Subheader(String),
    /// A row of KPIs shown side by side
    Metrics(Vec<Kpi>),
    Chart(ChartSpec),
    /// Informational text, e.g. an empty-result placeholder
    Info(String),
    Error(String),
}

/// Everything one run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Absent when the run halted before the filters could be built
    pub controls: Option<Controls>,
    pub blocks: Vec<Block>,
}

impl Dashboard {
    /// True when the run stopped at the "no data" terminal state
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.controls.is_none()
    }

    #[must_use]
    pub fn errors(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Error(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn infos(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Info(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn charts(&self) -> Vec<&ChartSpec> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Chart(chart) => Some(chart),
                _ => None,
            })
            .collect()
    }

    /// Look up a KPI by its label
    #[must_use]
    pub fn metric(&self, label: &str) -> Option<&KpiValue> {
        self.blocks.iter().find_map(|b| match b {
            Block::Metrics(kpis) => kpis.iter().find(|k| k.label == label).map(|k| &k.value),
            _ => None,
        })
    }

    /// Draw every block, in order, on `presenter`
    pub fn present(&self, presenter: &mut dyn Presenter) -> Result<()> {
        if let Some(controls) = &self.controls {
            presenter.controls(controls)?;
        }
        for block in &self.blocks {
            match block {
                Block::Title(text) => presenter.title(text)?,
                Block::Markdown(text) => presenter.markdown(text)?,
                Block::Subheader(text) => presenter.subheader(text)?,
                Block::Metrics(kpis) => presenter.metrics(kpis)?,
                Block::Chart(chart) => presenter.chart(chart)?,
                Block::Info(text) => presenter.info(text)?,
                Block::Error(text) => presenter.error(text)?,
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A passive renderer for dashboard blocks
pub trait Presenter {
    /// Show the filter controls; renderers without widgets may ignore them
    fn controls(&mut self, _controls: &Controls) -> Result<()> {
        Ok(())
    }
    fn title(&mut self, text: &str) -> Result<()>;
    fn markdown(&mut self, text: &str) -> Result<()>;
    fn subheader(&mut self, text: &str) -> Result<()>;
    fn metrics(&mut self, metrics: &[Kpi]) -> Result<()>;
    fn chart(&mut self, chart: &ChartSpec) -> Result<()>;
    fn info(&mut self, text: &str) -> Result<()>;
    fn error(&mut self, text: &str) -> Result<()>;
}

/// Build the dashboard for one run
///
/// `selection` is the current control state; `None` means the initial run,
/// which uses [`FilterOptions::default_selection`]. A load error is shown
/// first; if any base table is empty the run halts with a blocking message.
pub fn render(
    loaded: &LoadedTables,
    selection: Option<&FilterSelection>,
    config: &DashboardConfig,
) -> Result<Dashboard> {
    let mut blocks = vec![
        Block::Title(TITLE.to_string()),
        Block::Markdown(SUBTITLE.to_string()),
    ];

    if let Some(error) = &loaded.error {
        blocks.push(Block::Error(error.clone()));
    }

    if loaded.tables.any_empty() {
        log::warn!("At least one base table from {} is empty", loaded.locator);
        blocks.push(Block::Error(NO_DATA_MESSAGE.to_string()));
        return Ok(Dashboard {
            controls: None,
            blocks,
        });
    }

    let enriched = EnrichedTables::from_base(&loaded.tables)?;
    let options = FilterOptions::from_tables(&enriched, config)?;
    let selection = match selection {
        Some(current) => FilterSelection {
            airport_count: options.clamp_airport_count(current.airport_count),
            ..current.clone()
        },
        None => options.default_selection(config),
    };

    let views = apply_filters(&enriched, &selection)?;

    let kpis = compute_kpis(&enriched.passenger_summary, &views)?;
    blocks.push(Block::Subheader(KPI_SECTION.to_string()));
    blocks.extend(kpi_blocks(&kpis));

    blocks.push(Block::Subheader(AGE_SECTION.to_string()));
    let ages = age_distribution(&views.passengers)?;
    blocks.push(if ages.is_empty() {
        Block::Info(NO_AGE_DATA.to_string())
    } else {
        Block::Chart(ChartSpec::age_distribution(&ages))
    });

    blocks.push(Block::Subheader(AIRPORT_SECTION.to_string()));
    let airports = top_airport_status(&views.flights, selection.airport_count)?;
    blocks.push(if airports.is_empty() {
        Block::Info(NO_AIRPORT_DATA.to_string())
    } else {
        Block::Chart(ChartSpec::airport_status(&airports, selection.airport_count))
    });

    blocks.push(Block::Subheader(MONTHLY_SECTION.to_string()));
    let months = monthly_trend(&views.flights)?;
    blocks.push(if months.is_empty() {
        Block::Info(NO_MONTHLY_DATA.to_string())
    } else {
        Block::Chart(ChartSpec::monthly_trend(&months))
    });

    // Ranked over every passenger: the age and status filters do not apply here
    blocks.push(Block::Subheader(NATIONALITY_SECTION.to_string()));
    let nationalities = nationality_ranking(&enriched.passenger_summary, config.nationality_limit)?;
    blocks.push(if nationalities.is_empty() {
        Block::Info(NO_NATIONALITY_DATA.to_string())
    } else {
        Block::Chart(ChartSpec::nationality_ranking(&nationalities))
    });

    blocks.push(Block::Markdown(FOOTER_RULE.to_string()));
    blocks.push(Block::Markdown(CREDIT.to_string()));

    Ok(Dashboard {
        controls: Some(Controls { options, selection }),
        blocks,
    })
}

fn kpi_blocks(kpis: &KpiBlock) -> [Block; 2] {
    [
        Block::Metrics(vec![
            Kpi::new("Total Passengers", KpiValue::Count(kpis.total_passengers)),
            Kpi::new("Filtered Passengers", KpiValue::Count(kpis.filtered_passengers)),
            Kpi::new("Total Flights", KpiValue::Count(kpis.filtered_flights)),
            Kpi::new("Avg Passenger Age", KpiValue::Decimal(kpis.mean_age)),
        ]),
        Block::Metrics(vec![
            Kpi::new("Delayed Flights (%)", KpiValue::Percent(kpis.delayed_percentage)),
            Kpi::new("Cancelled Flights (%)", KpiValue::Percent(kpis.cancelled_percentage)),
        ]),
    ]
}
