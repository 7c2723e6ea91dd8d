//! Chart specifications handed to a renderer

use serde::Serialize;

use crate::algorithm::report::{AgeCount, AirportStatusBreakdown, MonthCount, NationalityFlights};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    /// Line with a marker on every point
    MarkedLine,
    Bar,
    /// One bar per x value, segmented by series
    StackedBar,
}

/// X coordinate: a number or a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AxisValue {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for AxisValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: AxisValue,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    /// Legend entry; `None` for single-series charts
    pub name: Option<String>,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl ChartSpec {
    fn single(kind: ChartKind, title: &str, x_label: &str, y_label: &str, points: Vec<Point>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            series: vec![Series { name: None, points }],
        }
    }

    #[must_use]
    pub fn age_distribution(rows: &[AgeCount]) -> Self {
        Self::single(
            ChartKind::Line,
            "Age Distribution of Passengers",
            "Age",
            "Number of Passengers",
            rows.iter()
                .map(|r| Point {
                    x: AxisValue::Int(r.age),
                    y: r.passengers as i64,
                })
                .collect(),
        )
    }

    /// One series per status; airports keep their rank order on the x axis
    #[must_use]
    pub fn airport_status(rows: &[AirportStatusBreakdown], airport_count: usize) -> Self {
        let mut series: Vec<Series> = Vec::new();
        for row in rows {
            for status in &row.statuses {
                let point = Point {
                    x: AxisValue::Text(row.airport.clone()),
                    y: status.count as i64,
                };
                match series
                    .iter_mut()
                    .find(|s| s.name.as_deref() == Some(status.status.as_str()))
                {
                    Some(existing) => existing.points.push(point),
                    None => series.push(Series {
                        name: Some(status.status.clone()),
                        points: vec![point],
                    }),
                }
            }
        }
        series.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            kind: ChartKind::StackedBar,
            title: format!("Flight Status Distribution for Top {airport_count} Airports"),
            x_label: "Airport".to_string(),
            y_label: "Number of Flights".to_string(),
            series,
        }
    }

    #[must_use]
    pub fn monthly_trend(rows: &[MonthCount]) -> Self {
        Self::single(
            ChartKind::MarkedLine,
            "Monthly Trends in Flight Departures",
            "Month",
            "Number of Departures",
            rows.iter()
                .map(|r| Point {
                    x: AxisValue::Int(r.month),
                    y: r.flights as i64,
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn nationality_ranking(rows: &[NationalityFlights]) -> Self {
        Self::single(
            ChartKind::Bar,
            "Flights Taken by Nationality",
            "Nationality",
            "Flights Taken",
            rows.iter()
                .map(|r| Point {
                    x: AxisValue::Text(r.nationality.clone()),
                    y: r.flights_taken,
                })
                .collect(),
        )
    }
}
