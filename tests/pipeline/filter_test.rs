use airline_dash::models::{ArrowTable, EnrichedFlight, Flight, Passenger, PassengerSummary};
use airline_dash::{
    BaseTables, ContinentSelection, EnrichedTables, FilterOptions, FilterSelection, apply_filters,
};

use crate::utils::{
    flight, passenger, sample_airports, sample_counts, sample_flights, sample_passengers,
    sample_tables, statuses, test_config,
};

fn enriched() -> EnrichedTables {
    EnrichedTables::from_base(&sample_tables()).unwrap()
}

fn all_statuses() -> Vec<Option<String>> {
    statuses(&["Delayed", "On-time", "Cancelled"])
}

fn selection(statuses: Vec<Option<String>>, age_range: (i64, i64), continent: &str) -> FilterSelection {
    FilterSelection {
        statuses,
        age_range,
        continent: ContinentSelection::parse(continent),
        airport_count: 10,
    }
}

#[test]
fn age_filter_keeps_only_passengers_in_range() {
    let tables = enriched();
    let total = tables.passenger_summary.num_rows();

    for (lo, hi) in [(0, 100), (18, 18), (20, 60), (30, 42), (61, 70), (71, 90), (60, 20)] {
        let views = apply_filters(&tables, &selection(all_statuses(), (lo, hi), "All")).unwrap();
        assert!(views.passengers.num_rows() <= total);
        let rows = PassengerSummary::from_record_batch(&views.passengers).unwrap();
        assert!(
            rows.iter().all(|p| p.age.is_some_and(|age| lo <= age && age <= hi)),
            "range {lo}-{hi}"
        );
    }
}

#[test]
fn three_passengers_scenario() {
    let passengers = vec![
        passenger(1, 18, Some("Spain")),
        passenger(2, 30, Some("Japan")),
        passenger(3, 65, Some("USA")),
    ];
    let tables = BaseTables::from_records(
        &passengers,
        &sample_flights(),
        &sample_airports(),
        &sample_counts(),
    )
    .unwrap();
    let enriched = EnrichedTables::from_base(&tables).unwrap();

    let views = apply_filters(&enriched, &selection(all_statuses(), (20, 60), "All")).unwrap();
    let rows = PassengerSummary::from_record_batch(&views.passengers).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].age, Some(30));
}

#[test]
fn status_filter_sees_only_the_selected_continent() {
    let tables = enriched();
    let delayed = statuses(&["Delayed"]);

    let global = apply_filters(&tables, &selection(delayed.clone(), (0, 100), "All")).unwrap();
    assert_eq!(global.flights.num_rows(), 4);

    let europe = apply_filters(&tables, &selection(delayed, (0, 100), "Europe")).unwrap();
    let rows = EnrichedFlight::from_record_batch(&europe.flights).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|f| f.continents.as_deref() == Some("Europe")));
    assert!(rows.iter().all(|f| f.flight_status.as_deref() == Some("Delayed")));
}

#[test]
fn continent_match_is_exact() {
    let tables = enriched();
    for continent in ["europe", "Europ", "Antarctica"] {
        let views = apply_filters(&tables, &selection(all_statuses(), (0, 100), continent)).unwrap();
        assert_eq!(views.flights.num_rows(), 0, "{continent}");
    }
}

#[test]
fn empty_status_selection_keeps_no_flights() {
    let views = apply_filters(&enriched(), &selection(Vec::new(), (0, 100), "All")).unwrap();
    assert_eq!(views.flights.num_rows(), 0);
    // Passengers are filtered independently
    assert_eq!(views.passengers.num_rows(), 8);
}

#[test]
fn options_are_derived_from_data() {
    let options = FilterOptions::from_tables(&enriched(), &test_config()).unwrap();
    assert_eq!(options.statuses, all_statuses());
    assert_eq!(options.age_bounds, Some((18, 70)));
    assert_eq!(options.continents, vec!["All", "Europe", "Asia", "North America"]);
    assert_eq!(options.airport_count_range, (5, 10));

    let defaults = options.default_selection(&test_config());
    assert_eq!(defaults.statuses, options.statuses);
    assert_eq!(defaults.age_range, (20, 60));
    assert_eq!(defaults.continent, ContinentSelection::All);
    assert_eq!(defaults.airport_count, 10);
}

#[test]
fn default_age_range_is_clamped_to_observed_ages() {
    let passengers = vec![passenger(1, 25, Some("Spain")), passenger(2, 40, Some("Japan"))];
    let tables = BaseTables::from_records(
        &passengers,
        &sample_flights(),
        &sample_airports(),
        &sample_counts(),
    )
    .unwrap();
    let enriched = EnrichedTables::from_base(&tables).unwrap();

    let options = FilterOptions::from_tables(&enriched, &test_config()).unwrap();
    assert_eq!(options.age_bounds, Some((25, 40)));
    assert_eq!(options.default_selection(&test_config()).age_range, (25, 40));
}

#[test]
fn airport_count_is_clamped() {
    let options = FilterOptions::from_tables(&enriched(), &test_config()).unwrap();
    assert_eq!(options.clamp_airport_count(3), 5);
    assert_eq!(options.clamp_airport_count(7), 7);
    assert_eq!(options.clamp_airport_count(25), 10);
}

#[test]
fn missing_status_is_selectable_and_selected_by_default() {
    let mut flights = sample_flights();
    flights.push(Flight {
        flight_status: None,
        ..flight(12, Some(1), "Delayed", 4)
    });
    let tables = BaseTables::from_records(
        &sample_passengers(),
        &flights,
        &sample_airports(),
        &sample_counts(),
    )
    .unwrap();
    let enriched = EnrichedTables::from_base(&tables).unwrap();

    let options = FilterOptions::from_tables(&enriched, &test_config()).unwrap();
    assert_eq!(
        options.statuses,
        statuses(&["Delayed", "On-time", "Cancelled", "(none)"])
    );

    let defaults = options.default_selection(&test_config());
    let views = apply_filters(&enriched, &defaults).unwrap();
    assert_eq!(views.flights.num_rows(), 12);

    let known_only = apply_filters(&enriched, &selection(all_statuses(), (20, 60), "All")).unwrap();
    assert_eq!(known_only.flights.num_rows(), 11);

    let missing_only = apply_filters(&enriched, &selection(statuses(&["(none)"]), (20, 60), "All")).unwrap();
    let rows = EnrichedFlight::from_record_batch(&missing_only.flights).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].flight_id, 12);
}

#[test]
fn passengers_without_age_never_pass_the_age_filter() {
    let mut passengers = sample_passengers();
    passengers.push(Passenger {
        age: None,
        ..passenger(9, 0, Some("Spain"))
    });
    let tables = BaseTables::from_records(
        &passengers,
        &sample_flights(),
        &sample_airports(),
        &sample_counts(),
    )
    .unwrap();
    let enriched = EnrichedTables::from_base(&tables).unwrap();
    assert_eq!(enriched.passenger_summary.num_rows(), 9);

    let options = FilterOptions::from_tables(&enriched, &test_config()).unwrap();
    assert_eq!(options.age_bounds, Some((18, 70)));

    let views = apply_filters(&enriched, &selection(all_statuses(), (0, 100), "All")).unwrap();
    let rows = PassengerSummary::from_record_batch(&views.passengers).unwrap();
    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|p| p.passenger_id != 9));
}
