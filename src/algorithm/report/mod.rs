//! Summary statistics over the filtered views
//!
//! Every report accepts empty input and returns an empty or zeroed result;
//! the presentation layer turns those into "no data" placeholders.

pub mod groups;
pub mod kpi;

pub use groups::{
    AgeCount, AirportStatusBreakdown, MonthCount, NationalityFlights, StatusCount,
    age_distribution, monthly_trend, nationality_ranking, top_airport_status,
};
pub use kpi::{KpiBlock, compute_kpis};

/// Round half away from zero to `decimals` places
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `part / whole * 100`, or 0 when `whole` is 0
#[must_use]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}
