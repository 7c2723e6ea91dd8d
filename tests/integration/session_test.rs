use airline_dash::presentation::{KpiValue, NO_DATA_MESSAGE};
use airline_dash::{
    BaseTables, Command, ContinentSelection, MemorySource, Session, SqliteSource,
};

use crate::utils::{sample_tables, sqlite_fixture, test_config};

fn sample_session() -> Session<MemorySource> {
    Session::new(MemorySource::new("memory://sample", sample_tables()), test_config())
}

#[test]
fn commands_reuse_cached_tables() {
    let mut session = sample_session();
    assert!(!session.cache().is_loaded());

    session.render().unwrap();
    session.apply("age 30 70".parse().unwrap()).unwrap();
    session.apply("continent Asia".parse().unwrap()).unwrap();
    session.apply("top 5".parse().unwrap()).unwrap();

    assert!(session.cache().is_loaded());
    assert_eq!(session.cache().loads(), 1);
}

#[test]
fn reload_reads_the_store_again() {
    let mut session = sample_session();
    session.render().unwrap();
    session.apply(Command::Reload).unwrap();
    session.apply(Command::Reload).unwrap();
    assert_eq!(session.cache().loads(), 3);
}

#[test]
fn first_command_starts_from_defaults() {
    let mut session = sample_session();
    let dashboard = session.apply(Command::Age(30, 70)).unwrap();

    let selection = session.selection().unwrap();
    assert_eq!(selection.age_range, (30, 70));
    assert_eq!(selection.statuses.len(), 3);
    assert_eq!(selection.airport_count, 10);
    // Ages 30, 42, 55, 60, 61, 70
    assert_eq!(dashboard.metric("Filtered Passengers"), Some(&KpiValue::Count(6)));
}

#[test]
fn empty_status_command_clears_flights() {
    let mut session = sample_session();
    session.render().unwrap();
    let dashboard = session.apply("status".parse().unwrap()).unwrap();

    assert!(session.selection().unwrap().statuses.is_empty());
    assert_eq!(dashboard.metric("Total Flights"), Some(&KpiValue::Count(0)));
    // Passenger KPIs are unaffected by the status selection
    assert_eq!(dashboard.metric("Filtered Passengers"), Some(&KpiValue::Count(5)));
}

#[test]
fn continent_then_status() {
    let mut session = sample_session();
    session.apply("continent Europe".parse().unwrap()).unwrap();
    let dashboard = session.apply("status Delayed".parse().unwrap()).unwrap();

    assert_eq!(
        session.selection().unwrap().continent,
        ContinentSelection::Only("Europe".to_string())
    );
    // Delayed flights 1 and 5 leave from European airports
    assert_eq!(dashboard.metric("Total Flights"), Some(&KpiValue::Count(2)));
    assert_eq!(dashboard.metric("Delayed Flights (%)"), Some(&KpiValue::Percent(100.0)));
}

#[test]
fn top_count_is_clamped() {
    let mut session = sample_session();
    session.apply(Command::Top(2)).unwrap();
    assert_eq!(session.selection().unwrap().airport_count, 5);

    session.apply(Command::Top(25)).unwrap();
    assert_eq!(session.selection().unwrap().airport_count, 10);
}

#[test]
fn reset_restores_defaults() {
    let mut session = sample_session();
    let initial = session.render().unwrap();

    session.apply("status Cancelled".parse().unwrap()).unwrap();
    session.apply("age 60 70".parse().unwrap()).unwrap();
    let reset = session.apply(Command::Reset).unwrap();

    assert_eq!(reset, initial);
    assert_eq!(session.selection().unwrap().age_range, (20, 60));
}

#[test]
fn halted_session_stays_halted() {
    let mut session = Session::new(MemorySource::new("memory://empty", BaseTables::empty()), test_config());

    let dashboard = session.apply(Command::Age(20, 30)).unwrap();
    assert!(dashboard.is_halted());
    assert_eq!(dashboard.errors(), vec![NO_DATA_MESSAGE]);
    assert!(session.selection().is_none());
    assert_eq!(session.cache().loads(), 1);
}

#[test]
fn sqlite_session_loads_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = sqlite_fixture(dir.path());
    let mut session = Session::new(SqliteSource::new(&path), test_config());

    session.render().unwrap();
    let dashboard = session.apply("age 18 65".parse().unwrap()).unwrap();

    assert_eq!(dashboard.metric("Filtered Passengers"), Some(&KpiValue::Count(3)));
    assert_eq!(session.cache().loads(), 1);
}
