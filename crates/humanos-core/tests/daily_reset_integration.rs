//! Integration tests for the daily boundary: sun archiving, counter
//! roll-up and streak bookkeeping across simulated multi-day sessions.

use chrono::Duration;
use humanos_core::{FixedClock, MemoryStore, Session, SunStatus};

fn session_at(instant: &str) -> Session<MemoryStore, FixedClock> {
    let clock = FixedClock::at(instant.parse().unwrap());
    Session::new(MemoryStore::new(), clock, "mira", 1)
}

#[test]
fn partial_day_rolls_warm_and_breaks_streak() {
    let clock = FixedClock::at("2026-01-07T08:00:00Z".parse().unwrap());
    let mut session = Session::new(MemoryStore::new(), clock.clone(), "mira", 1);
    session.load().unwrap();

    // 3 of 4 rituals done, completion stamp never set.
    for i in 0..3 {
        session
            .apply(|engine, now| engine.toggle_ritual(i, now))
            .unwrap()
            .unwrap();
    }
    session.flush().unwrap();

    // Next morning's load applies the reset.
    clock.advance(Duration::days(1));
    let mut session = Session::new(session.into_store(), clock, "mira", 1);
    let events = session.load().unwrap();
    assert_eq!(events.len(), 1);

    let record = session.record().unwrap();
    assert!(record.rituals.iter().all(|r| !r.done));
    assert_eq!(record.last_reset_date, Some("2026-01-08".parse().unwrap()));
    assert_eq!(record.sun_history.len(), 1);
    assert_eq!(record.sun_history[0].status, SunStatus::Warm);
    assert_eq!(record.statistics.total_rituals_done, 3);
    assert_eq!(record.statistics.current_streak, 0);
}

#[test]
fn five_perfect_days_then_a_miss() {
    let clock = FixedClock::at("2026-01-05T07:00:00Z".parse().unwrap());
    let mut store = MemoryStore::new();
    let mut expected_streaks = Vec::new();

    // Five perfect days in a row.
    for _ in 0..5 {
        let mut session = Session::new(store, clock.clone(), "mira", 1);
        session.load().unwrap();
        let count = session.record().unwrap().rituals.len();
        for i in 0..count {
            session
                .apply(|engine, now| engine.toggle_ritual(i, now))
                .unwrap();
        }
        session.flush().unwrap();
        store = session.into_store();
        clock.advance(Duration::days(1));

        // Peek at the streak as the next day's load sees it.
        let mut peek = Session::new(store, clock.clone(), "mira", 1);
        peek.load().unwrap();
        peek.flush().unwrap();
        expected_streaks.push(peek.record().unwrap().statistics.current_streak);
        store = peek.into_store();
    }
    assert_eq!(expected_streaks, vec![1, 2, 3, 4, 5]);

    // Day six: nothing done. The next load zeroes the streak but keeps
    // the longest.
    clock.advance(Duration::days(1));
    let mut session = Session::new(store, clock, "mira", 1);
    session.load().unwrap();
    let stats = &session.record().unwrap().statistics;
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.longest_streak, 5);
    assert_eq!(stats.perfect_days, 5);
}

#[test]
fn morning_completion_burns() {
    let clock = FixedClock::at("2026-01-07T07:30:00Z".parse().unwrap());
    let mut session = Session::new(MemoryStore::new(), clock.clone(), "mira", 1);
    session.load().unwrap();
    let count = session.record().unwrap().rituals.len();
    for i in 0..count {
        session
            .apply(|engine, now| engine.toggle_ritual(i, now))
            .unwrap();
    }
    session.flush().unwrap();

    clock.advance(Duration::days(1));
    let mut session = Session::new(session.into_store(), clock, "mira", 1);
    session.load().unwrap();
    assert_eq!(
        session.record().unwrap().sun_history[0].status,
        SunStatus::Burning
    );
}

#[test]
fn second_load_same_day_is_a_noop() {
    let mut session = session_at("2026-01-07T08:00:00Z");
    session.load().unwrap();
    session
        .apply(|engine, now| engine.toggle_ritual(0, now))
        .unwrap();
    session.flush().unwrap();
    let before = session.record().unwrap().clone();

    // Another tab loads the same stored day: watermarks are current, so
    // normalization changes nothing.
    let clock = FixedClock::at("2026-01-07T23:00:00Z".parse().unwrap());
    let mut session = Session::new(session.into_store(), clock, "mira", 1);
    let events = session.load().unwrap();
    assert!(events.is_empty());
    assert_eq!(session.record().unwrap(), &before);
}
