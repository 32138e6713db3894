//! Derived, read-only statistics over the in-progress week.
//!
//! Everything here is recomputed on demand from the record; nothing is
//! persisted separately from the counters it derives from.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::progress::record::{
    HabitResult, ProgressRecord, Statistics, NEURON_THRESHOLD_DAYS,
};

/// On-demand snapshot of the current week for the status surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub plan_percent: u32,
    pub day_streak: u32,
    pub neuron_count: u32,
    pub habit_results: Vec<HabitResult>,
    pub statistics: Statistics,
}

pub fn week_summary(record: &ProgressRecord, today: NaiveDate) -> WeekSummary {
    WeekSummary {
        plan_percent: plan_percent(record),
        day_streak: day_streak(record, today),
        neuron_count: live_neuron_count(record),
        habit_results: live_habit_results(record),
        statistics: record.statistics.clone(),
    }
}

/// Share of the work week's plan completed so far, 0..=100.
///
/// A day only contributes its enabled habits to the denominator, and
/// only enabled completions to the numerator; a day with everything
/// disabled costs nothing.
pub fn plan_percent(record: &ProgressRecord) -> u32 {
    let all_count = record.work_habits.len();
    let mut possible = 0usize;
    let mut completed = 0usize;
    for cell in &record.week {
        match &cell.enabled {
            Some(enabled) => {
                possible += enabled.len();
                completed += cell.completed.iter().filter(|id| enabled.contains(id)).count();
            }
            None => {
                possible += all_count;
                completed += cell.completed.len();
            }
        }
    }
    if possible == 0 {
        return 0;
    }
    (100.0 * completed as f64 / possible as f64).round() as u32
}

/// UI-level streak: consecutive fully-completed days counted backward
/// from today's weekday cell. A day with an empty enabled set is
/// skipped; the walk stops at the first incomplete day or Monday.
pub fn day_streak(record: &ProgressRecord, today: NaiveDate) -> u32 {
    let today_index = today.weekday().num_days_from_monday() as usize;
    let mut streak = 0;
    for cell in record.week.iter().take(today_index + 1).rev() {
        let enabled = match &cell.enabled {
            Some(enabled) => enabled.clone(),
            None => ProgressRecord::habit_ids(&record.work_habits),
        };
        if enabled.is_empty() {
            continue;
        }
        if enabled.iter().all(|id| cell.completed.contains(id)) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Neuron count for the in-progress personal week, without waiting for
/// the weekly reset.
pub fn live_neuron_count(record: &ProgressRecord) -> u32 {
    live_habit_results(record)
        .iter()
        .filter(|r| r.is_neuron)
        .count() as u32
}

pub fn live_habit_results(record: &ProgressRecord) -> Vec<HabitResult> {
    record
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
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ProgressRecord {
        ProgressRecord::bootstrap("2026-01-07".parse().unwrap())
    }

    #[test]
    fn plan_percent_counts_only_enabled() {
        let mut record = record();
        let id = record.work_habits[0].id;
        // Narrow every day to one habit; complete it on 3 of 7 days.
        for cell in &mut record.week {
            cell.enabled = Some([id].into_iter().collect());
        }
        for cell in record.week.iter_mut().take(3) {
            cell.completed.insert(id);
        }
        assert_eq!(plan_percent(&record), 43); // round(100 * 3/7)
    }

    #[test]
    fn plan_percent_ignores_disabled_completions() {
        let mut record = record();
        let narrowed = record.work_habits[0].id;
        let stray = record.work_habits[1].id;
        record.week[0].enabled = Some([narrowed].into_iter().collect());
        record.week[0].completed.insert(stray);
        for cell in record.week.iter_mut().skip(1) {
            cell.enabled = Some(Default::default());
        }
        assert_eq!(plan_percent(&record), 0);
    }

    #[test]
    fn plan_percent_empty_plan_is_zero() {
        let mut record = record();
        record.work_habits.clear();
        for cell in &mut record.week {
            cell.enabled = Some(Default::default());
        }
        assert_eq!(plan_percent(&record), 0);
    }

    #[test]
    fn day_streak_stops_at_first_gap() {
        let mut record = record();
        let id = record.work_habits[0].id;
        for cell in &mut record.week {
            cell.enabled = Some([id].into_iter().collect());
        }
        // Wednesday (index 2) is today. Mon incomplete, Tue+Wed complete.
        record.week[1].completed.insert(id);
        record.week[2].completed.insert(id);
        assert_eq!(day_streak(&record, "2026-01-07".parse().unwrap()), 2);
    }

    #[test]
    fn day_streak_skips_rest_days() {
        let mut record = record();
        let id = record.work_habits[0].id;
        for cell in &mut record.week {
            cell.enabled = Some([id].into_iter().collect());
        }
        // Tuesday has nothing planned; Mon and Wed complete.
        record.week[0].completed.insert(id);
        record.week[1].enabled = Some(Default::default());
        record.week[2].completed.insert(id);
        assert_eq!(day_streak(&record, "2026-01-07".parse().unwrap()), 2);
    }

    #[test]
    fn live_neurons_use_the_four_day_rule() {
        let mut record = record();
        let a = record.personal_habits[0].id;
        let b = record.personal_habits[1].id;
        for cell in record.personal_week.iter_mut().take(4) {
            cell.completed.insert(a);
        }
        for cell in record.personal_week.iter_mut().take(3) {
            cell.completed.insert(b);
        }
        assert_eq!(live_neuron_count(&record), 1);
        let results = live_habit_results(&record);
        assert!(results[0].is_neuron);
        assert!(!results[1].is_neuron);
        assert!(!results[2].is_neuron);
    }
}
