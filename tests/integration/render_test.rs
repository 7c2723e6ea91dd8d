use airline_dash::models::{Airport, Flight, Passenger, PassengerFlightCount};
use airline_dash::presentation::{
    AIRPORT_SECTION, AGE_SECTION, CREDIT, ChartKind, ConsolePresenter, FOOTER_RULE, KpiValue,
    NATIONALITY_SECTION,
    NO_AGE_DATA, NO_AIRPORT_DATA, NO_DATA_MESSAGE, NO_MONTHLY_DATA, NO_NATIONALITY_DATA,
};
use airline_dash::{
    BaseTables, Block, ContinentSelection, FilterSelection, LoadedTables, SqliteSource, load_tables,
    render,
};

use crate::utils::{
    flight, loaded, sample_airports, sample_counts, sample_passengers, sample_tables,
    sqlite_fixture, statuses, test_config,
};

fn selection(labels: &[&str], age_range: (i64, i64), continent: &str) -> FilterSelection {
    FilterSelection {
        statuses: statuses(labels),
        age_range,
        continent: ContinentSelection::parse(continent),
        airport_count: 10,
    }
}

#[test]
fn default_run_renders_every_section() {
    let dashboard = render(&loaded(sample_tables()), None, &test_config()).unwrap();

    assert!(!dashboard.is_halted());
    assert!(dashboard.errors().is_empty());
    assert!(dashboard.infos().is_empty());
    assert_eq!(dashboard.blocks[0], Block::Title("Airline Data Interactive Dashboard".into()));

    let kinds: Vec<ChartKind> = dashboard.charts().iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![ChartKind::Line, ChartKind::StackedBar, ChartKind::MarkedLine, ChartKind::Bar]
    );

    assert_eq!(dashboard.metric("Total Passengers"), Some(&KpiValue::Count(8)));
    assert_eq!(dashboard.metric("Filtered Passengers"), Some(&KpiValue::Count(5)));
    assert_eq!(dashboard.metric("Avg Passenger Age"), Some(&KpiValue::Decimal(42.4)));
    assert_eq!(dashboard.metric("Delayed Flights (%)"), Some(&KpiValue::Percent(36.36)));

    let controls = dashboard.controls.unwrap();
    assert_eq!(controls.selection.age_range, (20, 60));
    assert_eq!(controls.selection.statuses.len(), 3);
}

#[test]
fn empty_flight_selection_shows_placeholders() {
    let dashboard = render(
        &loaded(sample_tables()),
        Some(&selection(&[], (20, 60), "All")),
        &test_config(),
    )
    .unwrap();

    assert_eq!(dashboard.metric("Total Flights"), Some(&KpiValue::Count(0)));
    assert_eq!(dashboard.metric("Delayed Flights (%)"), Some(&KpiValue::Percent(0.0)));
    assert_eq!(dashboard.metric("Cancelled Flights (%)"), Some(&KpiValue::Percent(0.0)));
    assert_eq!(dashboard.infos(), vec![NO_AIRPORT_DATA, NO_MONTHLY_DATA]);
    assert!(dashboard.errors().is_empty());
}

#[test]
fn empty_age_range_shows_placeholder_and_keeps_nationalities() {
    let dashboard = render(
        &loaded(sample_tables()),
        Some(&selection(&["Delayed"], (95, 99), "All")),
        &test_config(),
    )
    .unwrap();

    assert_eq!(dashboard.infos(), vec![NO_AGE_DATA]);
    assert_eq!(dashboard.metric("Avg Passenger Age"), Some(&KpiValue::Decimal(0.0)));

    // Nationality ranking ignores the age filter
    let nationality = dashboard
        .charts()
        .into_iter()
        .find(|c| c.kind == ChartKind::Bar)
        .unwrap();
    assert_eq!(nationality.series[0].points.len(), 4);
}

#[test]
fn top_n_chart_respects_airport_count() {
    let mut current = selection(&["Delayed", "On-time", "Cancelled"], (20, 60), "All");
    current.airport_count = 5;
    let dashboard = render(&loaded(sample_tables()), Some(&current), &test_config()).unwrap();

    let chart = dashboard
        .charts()
        .into_iter()
        .find(|c| c.kind == ChartKind::StackedBar)
        .unwrap();
    assert_eq!(chart.title, "Flight Status Distribution for Top 5 Airports");
    let mut airports: Vec<String> = chart
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.x.to_string()))
        .collect();
    airports.sort();
    airports.dedup();
    assert_eq!(airports.len(), 5);
}

#[test]
fn out_of_range_airport_count_is_clamped() {
    let mut current = selection(&["Delayed"], (20, 60), "All");
    current.airport_count = 50;
    let dashboard = render(&loaded(sample_tables()), Some(&current), &test_config()).unwrap();
    assert_eq!(dashboard.controls.unwrap().selection.airport_count, 10);
}

#[test]
fn any_empty_base_table_halts() {
    let tables = BaseTables::from_records(
        &sample_passengers(),
        &[] as &[Flight],
        &sample_airports(),
        &sample_counts(),
    )
    .unwrap();
    let dashboard = render(&loaded(tables), None, &test_config()).unwrap();

    assert!(dashboard.is_halted());
    assert_eq!(dashboard.errors(), vec![NO_DATA_MESSAGE]);
    assert!(dashboard.charts().is_empty());
    assert_eq!(dashboard.metric("Total Passengers"), None);
}

#[test]
fn load_failure_is_reported_then_halts() {
    let failed = load_tables(&SqliteSource::new("/nonexistent/airline.db"));
    let dashboard = render(&failed, None, &test_config()).unwrap();

    assert!(dashboard.is_halted());
    let errors = dashboard.errors();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].starts_with("Error loading data:"));
    assert_eq!(errors[1], NO_DATA_MESSAGE);
}

#[test]
fn render_is_repeatable() {
    let snapshot: LoadedTables = loaded(sample_tables());
    let current = selection(&["On-time"], (25, 55), "Europe");
    let first = render(&snapshot, Some(&current), &test_config()).unwrap();
    let second = render(&snapshot, Some(&current), &test_config()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn renders_from_sqlite_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = sqlite_fixture(dir.path());

    let dashboard = render(&load_tables(&SqliteSource::new(&path)), None, &test_config()).unwrap();
    // Ages 18, 30 and 65 with the default 20-60 range
    assert_eq!(dashboard.metric("Filtered Passengers"), Some(&KpiValue::Count(1)));
    assert_eq!(dashboard.metric("Avg Passenger Age"), Some(&KpiValue::Decimal(30.0)));
    assert_eq!(dashboard.metric("Total Flights"), Some(&KpiValue::Count(3)));
    assert_eq!(dashboard.metric("Delayed Flights (%)"), Some(&KpiValue::Percent(33.33)));
    assert_eq!(dashboard.metric("Cancelled Flights (%)"), Some(&KpiValue::Percent(33.33)));
}

#[test]
fn console_and_json_output() {
    let dashboard = render(&loaded(sample_tables()), None, &test_config()).unwrap();

    let mut presenter = ConsolePresenter::new(Vec::new());
    dashboard.present(&mut presenter).unwrap();
    let text = String::from_utf8(presenter.into_inner()).unwrap();
    for section in [AGE_SECTION, AIRPORT_SECTION, NATIONALITY_SECTION] {
        assert!(text.contains(section), "{section}");
    }
    assert!(text.contains("Delayed Flights (%)"));
    assert!(text.contains("36.36%"));

    let json: serde_json::Value = serde_json::from_str(&dashboard.to_json().unwrap()).unwrap();
    assert_eq!(json["blocks"][0]["type"], "title");
    assert_eq!(json["controls"]["selection"]["continent"], "All");
}

#[test]
fn unmatched_records_do_not_break_rendering() {
    let passengers = vec![Passenger {
        passenger_id: 1,
        age: Some(30),
        gender: None,
        nationality: None,
    }];
    let flights = vec![Flight {
        flight_id: 1,
        airport_id: Some(42),
        flight_status: Some("Delayed".into()),
        departure_month: 6,
        departure_year: 2022,
    }];
    let airports = vec![Airport {
        airport_id: 1,
        airport_name: Some("Heathrow".into()),
        continents: None,
    }];
    let counts = vec![PassengerFlightCount {
        passenger_id: 9,
        flights_taken: 1,
    }];
    let tables = BaseTables::from_records(&passengers, &flights, &airports, &counts).unwrap();
    let dashboard = render(&loaded(tables), None, &test_config()).unwrap();

    assert!(!dashboard.is_halted());
    // Flight's airport is unknown and the only passenger has no nationality
    assert_eq!(dashboard.infos(), vec![NO_AIRPORT_DATA, NO_NATIONALITY_DATA]);
    assert_eq!(dashboard.metric("Delayed Flights (%)"), Some(&KpiValue::Percent(100.0)));
    assert_eq!(dashboard.controls.unwrap().selection.age_range, (30, 30));
}

#[test]
fn dashboard_ends_with_rule_and_credit() {
    let dashboard = render(&loaded(sample_tables()), None, &test_config()).unwrap();
    let tail = &dashboard.blocks[dashboard.blocks.len() - 2..];
    assert_eq!(
        tail,
        [
            Block::Markdown(FOOTER_RULE.to_string()),
            Block::Markdown(CREDIT.to_string())
        ]
    );

    // The halted dashboard stops before the footer
    let empty = loaded(BaseTables::empty());
    let halted = render(&empty, None, &test_config()).unwrap();
    assert!(!halted.blocks.contains(&Block::Markdown(CREDIT.to_string())));
}

#[test]
fn default_view_counts_flights_without_status() {
    let flights = vec![
        flight(1, Some(1), "Delayed", 1),
        Flight {
            flight_status: None,
            ..flight(2, Some(1), "Delayed", 2)
        },
    ];
    let tables =
        BaseTables::from_records(&sample_passengers(), &flights, &sample_airports(), &sample_counts())
            .unwrap();
    let snapshot = loaded(tables);
    let dashboard = render(&snapshot, None, &test_config()).unwrap();

    assert_eq!(dashboard.metric("Total Flights"), Some(&KpiValue::Count(2)));
    assert_eq!(dashboard.metric("Delayed Flights (%)"), Some(&KpiValue::Percent(50.0)));
    assert_eq!(dashboard.metric("Cancelled Flights (%)"), Some(&KpiValue::Percent(0.0)));

    // Deselecting the missing status drops that flight
    let known = render(
        &snapshot,
        Some(&selection(&["Delayed"], (20, 60), "All")),
        &test_config(),
    )
    .unwrap();
    assert_eq!(known.metric("Total Flights"), Some(&KpiValue::Count(1)));
}
