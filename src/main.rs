use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use airline_dash::filter::parse_status;
use airline_dash::presentation::ConsolePresenter;
use airline_dash::{
    Command, ContinentSelection, Dashboard, DashboardConfig, FilterSelection, Session,
    SqliteSource,
};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Airline operations dashboard
#[derive(Parser, Debug)]
#[command(name = "airline-dash", version, about)]
struct Cli {
    /// SQLite database with the Passenger, Flight, Airport and PassengerFlight tables
    #[arg(long)]
    db: Option<PathBuf>,

    /// JSON file overriding the default configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Flight statuses to include (repeatable); "(none)" selects flights without
    /// a status. Defaults to every status
    #[arg(long = "status")]
    statuses: Vec<String>,

    /// Include no flight statuses at all
    #[arg(long, conflicts_with = "statuses")]
    no_status: bool,

    #[arg(long)]
    age_min: Option<i64>,

    #[arg(long)]
    age_max: Option<i64>,

    /// Continent name, or "All"
    #[arg(long)]
    continent: Option<String>,

    /// Number of airports in the status breakdown
    #[arg(long)]
    top_airports: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Read commands (status, age, continent, top, reset, reload, quit) from stdin
    #[arg(long)]
    interactive: bool,
}

impl Cli {
    fn has_overrides(&self) -> bool {
        !self.statuses.is_empty()
            || self.no_status
            || self.age_min.is_some()
            || self.age_max.is_some()
            || self.continent.is_some()
            || self.top_airports.is_some()
    }

    /// Apply the command-line overrides on top of the data-derived defaults
    fn overrides(&self, defaults: &FilterSelection) -> FilterSelection {
        let mut selection = defaults.clone();
        if self.no_status {
            selection.statuses.clear();
        } else if !self.statuses.is_empty() {
            selection.statuses = self.statuses.iter().map(|s| parse_status(s)).collect();
        }
        if let Some(lo) = self.age_min {
            selection.age_range.0 = lo;
        }
        if let Some(hi) = self.age_max {
            selection.age_range.1 = hi;
        }
        if let Some(continent) = &self.continent {
            selection.continent = ContinentSelection::parse(continent);
        }
        if let Some(count) = self.top_airports {
            selection.airport_count = count;
        }
        selection
    }
}

fn emit(dashboard: &Dashboard, format: OutputFormat) -> anyhow::Result<()> {
    let stdout = io::stdout();
    match format {
        OutputFormat::Text => {
            let mut presenter = ConsolePresenter::new(stdout.lock());
            dashboard.present(&mut presenter)?;
            presenter.into_inner().flush()?;
        }
        OutputFormat::Json => {
            let mut out = stdout.lock();
            writeln!(out, "{}", dashboard.to_json()?)?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(db) = &cli.db {
        config = config.with_database_path(db);
    }
    config.validate().context("Invalid configuration")?;

    info!("Using database {}", config.database_path.display());
    let mut session = Session::new(SqliteSource::from_config(&config), config);

    let mut dashboard = session.render().context("Failed to render dashboard")?;
    if cli.has_overrides() {
        if let Some(controls) = &dashboard.controls {
            let selection = cli.overrides(&controls.selection);
            session = session.with_selection(selection);
            dashboard = session.render().context("Failed to render dashboard")?;
        }
    }
    emit(&dashboard, cli.format)?;

    if !cli.interactive {
        return Ok(());
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command")?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if matches!(trimmed, "quit" | "exit") {
            break;
        }
        match trimmed.parse::<Command>() {
            Ok(command) => {
                let dashboard = session.apply(command).context("Failed to render dashboard")?;
                emit(&dashboard, cli.format)?;
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    Ok(())
}
