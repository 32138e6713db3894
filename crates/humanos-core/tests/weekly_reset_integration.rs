//! Integration tests for the weekly boundary: neuron archiving, grid
//! regeneration and the explicit reset path.

use chrono::Duration;
use humanos_core::{FixedClock, MemoryStore, ProgressEvent, Session};

fn start_session() -> (Session<MemoryStore, FixedClock>, FixedClock) {
    // Wednesday, Jan 7 2026; week starts Monday Jan 5.
    let clock = FixedClock::at("2026-01-07T08:00:00Z".parse().unwrap());
    let mut session = Session::new(MemoryStore::new(), clock.clone(), "mira", 1);
    session.load().unwrap();
    (session, clock)
}

/// Check personal habit A on `a_days` days and B on `b_days` days.
fn fill_personal_week(
    session: &mut Session<MemoryStore, FixedClock>,
    a_days: usize,
    b_days: usize,
) {
    for day in 0..a_days {
        session
            .apply(|engine, _| engine.toggle_personal_habit(day, 0))
            .unwrap()
            .unwrap();
    }
    for day in 0..b_days {
        session
            .apply(|engine, _| engine.toggle_personal_habit(day, 1))
            .unwrap()
            .unwrap();
    }
}

#[test]
fn crossing_monday_archives_the_week() {
    let (mut session, clock) = start_session();
    fill_personal_week(&mut session, 5, 2);
    session.flush().unwrap();

    // Next Monday.
    clock.advance(Duration::days(5));
    let mut session = Session::new(session.into_store(), clock, "mira", 1);
    let events = session.load().unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::WeekRolled { neuron_count: 1, .. })));

    let record = session.record().unwrap();
    assert_eq!(record.week_start, Some("2026-01-12".parse().unwrap()));
    assert_eq!(record.neuron_history.len(), 1);

    let archived = &record.neuron_history[0];
    assert_eq!(archived.neuron_count, 1);
    assert_eq!(archived.total_habits, 3);
    assert_eq!(archived.habit_results[0].completed_days, 5);
    assert!(archived.habit_results[0].is_neuron);
    assert_eq!(archived.habit_results[1].completed_days, 2);
    assert!(!archived.habit_results[1].is_neuron);

    assert_eq!(record.personal_week.len(), 7);
    assert!(record.personal_week.iter().all(|c| c.completed.is_empty()));
    assert_eq!(record.statistics.total_personal_habits_done, 7);
}

#[test]
fn explicit_reset_matches_the_automatic_path() {
    let (mut session, _clock) = start_session();
    fill_personal_week(&mut session, 4, 1);

    let event = session
        .apply(|engine, now| engine.reset_week(now))
        .unwrap()
        .unwrap();
    assert!(matches!(event, ProgressEvent::WeekRolled { neuron_count: 1, .. }));

    let record = session.record().unwrap();
    assert_eq!(record.neuron_history.len(), 1);
    assert_eq!(record.neuron_history[0].habit_results[0].completed_days, 4);
    assert!(record.personal_week.iter().all(|c| c.completed.is_empty()));
    // Same Monday: an explicit reset mid-week stays on the current week.
    assert_eq!(record.week_start, Some("2026-01-05".parse().unwrap()));
}

#[test]
fn work_enabled_sets_carry_by_weekday_position() {
    let (mut session, clock) = start_session();
    // Narrow habit 0 to Tuesday and Thursday only.
    session
        .apply(|engine, _| engine.toggle_habit_for_days(0, &[0, 2, 4, 5, 6]))
        .unwrap()
        .unwrap();
    let tuesday_enabled = session.record().unwrap().week[1].enabled.clone().unwrap();
    session
        .apply(|engine, _| engine.toggle_work_habit(1, 0))
        .unwrap()
        .unwrap();
    session.flush().unwrap();

    clock.advance(Duration::days(7));
    let mut session = Session::new(session.into_store(), clock, "mira", 1);
    session.load().unwrap();
    let record = session.record().unwrap();
    assert_eq!(record.week[1].enabled.as_ref(), Some(&tuesday_enabled));
    assert!(record.week[1].completed.is_empty());
}

#[test]
fn neuron_history_is_bounded_to_a_year() {
    let (mut session, clock) = start_session();
    session.flush().unwrap();
    let mut store = session.into_store();

    // 60 consecutive Mondays, each closing out a week.
    for _ in 0..60 {
        clock.advance(Duration::days(7));
        let mut session = Session::new(store, clock.clone(), "mira", 1);
        session.load().unwrap();
        session.flush().unwrap();
        store = session.into_store();
    }

    let mut session = Session::new(store, clock, "mira", 1);
    session.load().unwrap();
    assert_eq!(session.record().unwrap().neuron_history.len(), 52);
}
