//! Load-time normalization and boundary resets.
//!
//! Applied once per load: schema fill-in, the daily ritual reset and the
//! weekly grid rollover. Both boundary steps read the pre-reset data for
//! their statistics roll-up, then update the watermark as part of the
//! same step, so re-running normalization against current watermarks is
//! a field-for-field no-op. There is no background timer; a session that
//! spans midnight picks the reset up on its next load.

use chrono::{DateTime, NaiveDate, Timelike, Utc};

use crate::events::ProgressEvent;
use crate::progress::record::{
    date_label, fresh_week, monday_of, HabitResult, NeuronWeekRecord, ProgressRecord,
    SunDayRecord, SunStatus, NEURON_HISTORY_CAP, NEURON_THRESHOLD_DAYS, SUN_HISTORY_CAP,
};

/// Normalize a freshly loaded record against the current instant.
///
/// Returns the boundary events that fired (at most one daily and one
/// weekly per invocation).
pub fn normalize(record: &mut ProgressRecord, now: DateTime<Utc>) -> Vec<ProgressEvent> {
    let today = now.date_naive();
    sanitize(record, today);

    let mut events = Vec::new();
    if let Some(event) = daily_rollover(record, now) {
        events.push(event);
    }
    if let Some(event) = weekly_rollover(record, today) {
        events.push(event);
    }
    events
}

/// Structural repair of a merged snapshot: rebuild malformed grids,
/// purge ids of removed habits, materialize the work grid's enabled
/// sets, re-trim histories. Runs before any boundary math.
fn sanitize(record: &mut ProgressRecord, today: NaiveDate) {
    let monday = record.week_start.unwrap_or_else(|| monday_of(today));
    let work_ids = ProgressRecord::habit_ids(&record.work_habits);
    let personal_ids = ProgressRecord::habit_ids(&record.personal_habits);

    if record.week.len() != 7 {
        record.week = fresh_week(monday, Some(&work_ids));
    }
    if record.personal_week.len() != 7 {
        record.personal_week = fresh_week(monday, None);
    }

    for cell in &mut record.week {
        cell.completed.retain(|id| work_ids.contains(id));
        match &mut cell.enabled {
            Some(enabled) => enabled.retain(|id| work_ids.contains(id)),
            None => cell.enabled = Some(work_ids.clone()),
        }
    }
    for cell in &mut record.personal_week {
        cell.completed.retain(|id| personal_ids.contains(id));
        if let Some(enabled) = &mut cell.enabled {
            enabled.retain(|id| personal_ids.contains(id));
        }
    }

    trim_front(&mut record.neuron_history, NEURON_HISTORY_CAP);
    trim_front(&mut record.sun_history, SUN_HISTORY_CAP);
}

fn trim_front<T>(log: &mut Vec<T>, cap: usize) {
    if log.len() > cap {
        log.drain(..log.len() - cap);
    }
}

/// Daily boundary: archive the stale day, roll counters and streaks,
/// clear ritual and pill checkmarks, stamp the watermark.
fn daily_rollover(record: &mut ProgressRecord, now: DateTime<Utc>) -> Option<ProgressEvent> {
    let today = now.date_naive();
    let last = match record.last_reset_date {
        // Fresh or pre-watermark document: stamp today, nothing to roll.
        None => {
            record.last_reset_date = Some(today);
            return None;
        }
        Some(last) if last == today => return None,
        Some(last) => last,
    };

    let total = record.rituals.len() as u32;
    let done = record.rituals.iter().filter(|r| r.done).count() as u32;
    let missed = total - done;
    let all_done = total > 0 && missed == 0;
    let pills_done = record.pills.iter().filter(|p| p.done).count() as u64;

    let status = sun_status(all_done, done, missed, record.ritual_completed_at);
    record.sun_history.push(SunDayRecord {
        iso_date: last,
        status,
        completed_rituals: record
            .rituals
            .iter()
            .filter(|r| r.done)
            .map(|r| r.text.clone())
            .collect(),
        total_rituals: total,
    });
    trim_front(&mut record.sun_history, SUN_HISTORY_CAP);

    let stats = &mut record.statistics;
    stats.total_rituals_done += done as u64;
    stats.total_pills_done += pills_done;
    if all_done {
        stats.perfect_days += 1;
        stats.current_streak += 1;
        stats.longest_streak = stats.longest_streak.max(stats.current_streak);
        // Days missed entirely (no load at all) still break the chain.
        if (today - last).num_days() > 1 {
            stats.current_streak = 0;
        }
    } else {
        stats.current_streak = 0;
    }

    for ritual in &mut record.rituals {
        ritual.done = false;
    }
    for pill in &mut record.pills {
        pill.done = false;
    }
    record.ritual_completed_at = None;
    record.last_reset_date = Some(today);

    Some(ProgressEvent::DayRolled {
        date: last,
        sun_status: status,
        rituals_done: done,
    })
}

fn sun_status(
    all_done: bool,
    done: u32,
    missed: u32,
    completed_at: Option<DateTime<Utc>>,
) -> SunStatus {
    let in_morning_window = completed_at
        .map(|t| (6..10).contains(&t.hour()))
        .unwrap_or(false);
    if all_done && in_morning_window {
        SunStatus::Burning
    } else if all_done || (missed <= 2 && done >= 1) {
        SunStatus::Warm
    } else {
        SunStatus::Gray
    }
}

/// Weekly boundary: archive the ending week when the canonical Monday
/// moved, then regenerate both grids.
fn weekly_rollover(record: &mut ProgressRecord, today: NaiveDate) -> Option<ProgressEvent> {
    let monday = monday_of(today);
    match record.week_start {
        None => {
            record.week_start = Some(monday);
            None
        }
        Some(stored) if stored == monday => None,
        Some(_) => Some(roll_week(record, monday)),
    }
}

/// The weekly-boundary logic itself; `reset_week` invokes it directly
/// regardless of date. Reads the pre-reset grids for its roll-ups.
pub(crate) fn roll_week(record: &mut ProgressRecord, new_monday: NaiveDate) -> ProgressEvent {
    let work_done: u64 = record.week.iter().map(|c| c.completed.len() as u64).sum();
    let personal_done: u64 = record
        .personal_week
        .iter()
        .map(|c| c.completed.len() as u64)
        .sum();
    record.statistics.total_work_habits_done += work_done;
    record.statistics.total_personal_habits_done += personal_done;

    let ending_monday = record.week_start.unwrap_or(new_monday);
    let archived = close_out_week(record, ending_monday);
    let neuron_count = archived.neuron_count;
    record.neuron_history.push(archived);
    trim_front(&mut record.neuron_history, NEURON_HISTORY_CAP);

    // New work grid carries each day's enabled set by weekday position;
    // completion starts empty. The personal grid starts entirely fresh.
    let mut week = fresh_week(new_monday, None);
    for (cell, old) in week.iter_mut().zip(&record.week) {
        cell.enabled = old.enabled.clone();
    }
    record.week = week;
    record.personal_week = fresh_week(new_monday, None);
    record.week_start = Some(new_monday);

    ProgressEvent::WeekRolled {
        week_start: new_monday,
        neuron_count,
    }
}

/// Build the archive entry for the week currently stored in
/// `personal_week`, applying the 4-of-7 neuron rule per habit.
fn close_out_week(record: &ProgressRecord, week_start: NaiveDate) -> NeuronWeekRecord {
    let habit_results: Vec<HabitResult> = record
        .personal_habits
        .iter()
        .map(|habit| {
            let completed_days = record
                .personal_week
                .iter()
                .filter(|cell| cell.completed.contains(&habit.id))
                .count() as u8;
            HabitResult {
                name: habit.name.clone(),
                completed_days,
                is_neuron: completed_days >= NEURON_THRESHOLD_DAYS,
            }
        })
        .collect();

    NeuronWeekRecord {
        week_start_label: date_label(week_start),
        week_end_label: date_label(week_start + chrono::Duration::days(6)),
        iso_date: week_start,
        neuron_count: habit_results.iter().filter(|r| r.is_neuron).count() as u32,
        total_habits: record.personal_habits.len() as u32,
        habit_results,
        week: record.personal_week.clone(),
    }
}
