//! Console output
//!
//! Plain-text rendering of a dashboard: metrics as label/value lines and
//! charts as value tables.

use std::io::Write;

use itertools::Itertools;

use crate::error::Result;
use crate::filter::status_label;
use crate::presentation::{ChartKind, ChartSpec, Controls, Kpi, Presenter};

/// Writes dashboard blocks as text to any writer
#[derive(Debug)]
pub struct ConsolePresenter<W: Write> {
    out: W,
}

impl<W: Write> ConsolePresenter<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn controls(&mut self, controls: &Controls) -> Result<()> {
        let selection = &controls.selection;
        writeln!(self.out, "Filters")?;
        writeln!(
            self.out,
            "  Flight status: [{}] of [{}]",
            status_list(&selection.statuses),
            status_list(&controls.options.statuses)
        )?;
        let (lo, hi) = selection.age_range;
        match controls.options.age_bounds {
            Some((min_age, max_age)) => {
                writeln!(self.out, "  Age range: {lo}-{hi} (data: {min_age}-{max_age})")?;
            }
            None => writeln!(self.out, "  Age range: {lo}-{hi}")?,
        }
        writeln!(
            self.out,
            "  Continent: {} of [{}]",
            selection.continent.label(),
            controls.options.continents.join(", ")
        )?;
        let (min_count, max_count) = controls.options.airport_count_range;
        writeln!(
            self.out,
            "  Top airports: {} ({min_count}-{max_count})",
            selection.airport_count
        )?;
        writeln!(self.out)?;
        Ok(())
    }

    fn title(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        writeln!(self.out, "{}", "=".repeat(text.chars().count()))?;
        Ok(())
    }

    fn markdown(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    fn subheader(&mut self, text: &str) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{text}")?;
        writeln!(self.out, "{}", "-".repeat(text.chars().count()))?;
        Ok(())
    }

    fn metrics(&mut self, metrics: &[Kpi]) -> Result<()> {
        let width = metrics
            .iter()
            .map(|k| k.label.chars().count())
            .max()
            .unwrap_or(0);
        for kpi in metrics {
            writeln!(self.out, "  {:<width$}  {}", kpi.label, kpi.value)?;
        }
        Ok(())
    }

    fn chart(&mut self, chart: &ChartSpec) -> Result<()> {
        writeln!(self.out, "  {} [{}]", chart.title, kind_label(chart.kind))?;
        writeln!(self.out, "  {} -> {}", chart.x_label, chart.y_label)?;
        for series in &chart.series {
            if let Some(name) = &series.name {
                writeln!(self.out, "  {name}:")?;
            }
            for point in &series.points {
                writeln!(self.out, "    {:>24}  {}", point.x.to_string(), point.y)?;
            }
        }
        Ok(())
    }

    fn info(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "  (info) {text}")?;
        Ok(())
    }

    fn error(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "ERROR: {text}")?;
        Ok(())
    }
}

fn status_list(statuses: &[Option<String>]) -> String {
    statuses
        .iter()
        .map(|s| status_label(s.as_deref()))
        .join(", ")
}

const fn kind_label(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Line => "line",
        ChartKind::MarkedLine => "line with markers",
        ChartKind::Bar => "bar",
        ChartKind::StackedBar => "stacked bar",
    }
}
