//! Mutation operations over a normalized progress record.
//!
//! Every command is synchronous and total: out-of-range indices and
//! names that are empty after trimming make the whole operation a no-op
//! (`None`), never a panic and never a partial write. A command that
//! changed state returns the event describing it; the session layer uses
//! that to mark the record dirty for autosave.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::events::{HabitGrid, ProgressEvent};
use crate::progress::normalize::roll_week;
use crate::progress::record::{
    monday_of, CalendarEvent, EventColor, Habit, Layout, Pill, ProgressRecord, Theme, TimeOfDay,
};

/// Owns the in-memory record and applies commands to it.
#[derive(Debug, Clone)]
pub struct ProgressEngine {
    record: ProgressRecord,
}

impl ProgressEngine {
    pub fn new(record: ProgressRecord) -> Self {
        Self { record }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    pub fn into_record(self) -> ProgressRecord {
        self.record
    }

    // ── Rituals ──────────────────────────────────────────────────────

    pub fn toggle_ritual(&mut self, index: usize, now: DateTime<Utc>) -> Option<ProgressEvent> {
        let ritual = self.record.rituals.get_mut(index)?;
        ritual.done = !ritual.done;
        let done = ritual.done;

        let all_done = self.record.all_rituals_done();
        if all_done && self.record.ritual_completed_at.is_none() {
            self.record.ritual_completed_at = Some(now);
        } else if !all_done {
            self.record.ritual_completed_at = None;
        }

        Some(ProgressEvent::RitualToggled {
            index,
            done,
            all_done,
        })
    }

    /// Replace the checklist. `done` state is kept by position so an
    /// in-place rename preserves today's progress; entries empty after
    /// trimming are dropped.
    pub fn set_rituals(&mut self, texts: &[String]) -> Option<ProgressEvent> {
        let texts: Vec<&str> = texts
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();
        self.record.rituals = texts
            .iter()
            .enumerate()
            .map(|(i, text)| crate::progress::record::Ritual {
                text: text.to_string(),
                done: self.record.rituals.get(i).map(|r| r.done).unwrap_or(false),
            })
            .collect();
        if !self.record.all_rituals_done() {
            self.record.ritual_completed_at = None;
        }
        Some(ProgressEvent::RitualsReplaced {
            count: self.record.rituals.len(),
        })
    }

    // ── Weekly habit grids ───────────────────────────────────────────

    pub fn toggle_work_habit(&mut self, day: usize, habit_index: usize) -> Option<ProgressEvent> {
        let habit = self.record.work_habits.get(habit_index)?;
        let (id, name) = (habit.id, habit.name.clone());
        let cell = self.record.week.get_mut(day)?;
        let completed = if cell.completed.remove(&id) {
            false
        } else {
            cell.completed.insert(id);
            true
        };
        Some(ProgressEvent::HabitToggled {
            grid: HabitGrid::Work,
            day,
            habit: name,
            completed,
        })
    }

    pub fn toggle_personal_habit(
        &mut self,
        day: usize,
        habit_index: usize,
    ) -> Option<ProgressEvent> {
        let habit = self.record.personal_habits.get(habit_index)?;
        let (id, name) = (habit.id, habit.name.clone());
        let cell = self.record.personal_week.get_mut(day)?;
        let completed = if cell.completed.remove(&id) {
            false
        } else {
            cell.completed.insert(id);
            true
        };
        Some(ProgressEvent::HabitToggled {
            grid: HabitGrid::Personal,
            day,
            habit: name,
            completed,
        })
    }

    pub fn add_work_habit(&mut self, name: &str) -> Option<ProgressEvent> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let habit = Habit::new(name);
        // A new habit applies to every day until the user narrows it.
        for cell in &mut self.record.week {
            if let Some(enabled) = &mut cell.enabled {
                enabled.insert(habit.id);
            }
        }
        self.record.work_habits.push(habit);
        Some(ProgressEvent::HabitAdded {
            grid: HabitGrid::Work,
            name: name.to_string(),
        })
    }

    pub fn add_personal_habit(&mut self, name: &str) -> Option<ProgressEvent> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.record.personal_habits.push(Habit::new(name));
        Some(ProgressEvent::HabitAdded {
            grid: HabitGrid::Personal,
            name: name.to_string(),
        })
    }

    pub fn remove_work_habit(&mut self, index: usize) -> Option<ProgressEvent> {
        if index >= self.record.work_habits.len() {
            return None;
        }
        let habit = self.record.work_habits.remove(index);
        for cell in &mut self.record.week {
            cell.completed.remove(&habit.id);
            if let Some(enabled) = &mut cell.enabled {
                enabled.remove(&habit.id);
            }
        }
        Some(ProgressEvent::HabitRemoved {
            grid: HabitGrid::Work,
            name: habit.name,
        })
    }

    pub fn remove_personal_habit(&mut self, index: usize) -> Option<ProgressEvent> {
        if index >= self.record.personal_habits.len() {
            return None;
        }
        let habit = self.record.personal_habits.remove(index);
        for cell in &mut self.record.personal_week {
            cell.completed.remove(&habit.id);
            if let Some(enabled) = &mut cell.enabled {
                enabled.remove(&habit.id);
            }
        }
        Some(ProgressEvent::HabitRemoved {
            grid: HabitGrid::Personal,
            name: habit.name,
        })
    }

    /// Move a habit to a new display position. Day sets reference stable
    /// ids, so completion state follows the habit untouched.
    pub fn reorder_work_habit(&mut self, from: usize, to: usize) -> Option<ProgressEvent> {
        reorder(&mut self.record.work_habits, from, to)?;
        Some(ProgressEvent::HabitReordered {
            grid: HabitGrid::Work,
            from,
            to,
        })
    }

    pub fn reorder_personal_habit(&mut self, from: usize, to: usize) -> Option<ProgressEvent> {
        reorder(&mut self.record.personal_habits, from, to)?;
        Some(ProgressEvent::HabitReordered {
            grid: HabitGrid::Personal,
            from,
            to,
        })
    }

    /// Replace the work-habit name list. Ids are kept where a position
    /// survives (rename in place keeps that habit's week state); surplus
    /// habits are removed with their ids purged from every day set; new
    /// names get fresh ids enabled everywhere.
    pub fn set_work_habits(&mut self, names: &[String]) -> Option<ProgressEvent> {
        let fresh_ids = replace_names(&mut self.record.work_habits, names);
        let kept = ProgressRecord::habit_ids(&self.record.work_habits);
        for cell in &mut self.record.week {
            cell.completed.retain(|id| kept.contains(id));
            if let Some(enabled) = &mut cell.enabled {
                enabled.retain(|id| kept.contains(id));
                enabled.extend(fresh_ids.iter().copied());
            }
        }
        Some(ProgressEvent::HabitsReplaced {
            grid: HabitGrid::Work,
            count: self.record.work_habits.len(),
        })
    }

    pub fn set_personal_habits(&mut self, names: &[String]) -> Option<ProgressEvent> {
        replace_names(&mut self.record.personal_habits, names);
        let kept = ProgressRecord::habit_ids(&self.record.personal_habits);
        for cell in &mut self.record.personal_week {
            cell.completed.retain(|id| kept.contains(id));
            if let Some(enabled) = &mut cell.enabled {
                enabled.retain(|id| kept.contains(id));
            }
        }
        Some(ProgressEvent::HabitsReplaced {
            grid: HabitGrid::Personal,
            count: self.record.personal_habits.len(),
        })
    }

    /// Bulk day selection for a work habit: if the habit is enabled on
    /// *all* targeted days it is removed from all of them, otherwise it
    /// is added to all of them. One uniform flip, not per-day toggles.
    pub fn toggle_habit_for_days(
        &mut self,
        habit_index: usize,
        days: &[usize],
    ) -> Option<ProgressEvent> {
        let habit = self.record.work_habits.get(habit_index)?;
        let (id, name) = (habit.id, habit.name.clone());
        if days.is_empty() || days.iter().any(|&d| d >= self.record.week.len()) {
            return None;
        }

        let all_ids = ProgressRecord::habit_ids(&self.record.work_habits);
        let in_all = days.iter().all(|&d| {
            self.record.week[d]
                .enabled
                .as_ref()
                .map(|e| e.contains(&id))
                .unwrap_or(true)
        });
        for &d in days {
            let enabled = self.record.week[d]
                .enabled
                .get_or_insert_with(|| all_ids.clone());
            if in_all {
                enabled.remove(&id);
            } else {
                enabled.insert(id);
            }
        }
        Some(ProgressEvent::HabitDaysToggled {
            habit: name,
            days: days.to_vec(),
            enabled: !in_all,
        })
    }

    // ── Pills ────────────────────────────────────────────────────────

    pub fn toggle_pill(&mut self, index: usize) -> Option<ProgressEvent> {
        let pill = self.record.pills.get_mut(index)?;
        pill.done = !pill.done;
        Some(ProgressEvent::PillToggled {
            index,
            done: pill.done,
        })
    }

    pub fn add_pill(&mut self, name: &str, time_of_day: TimeOfDay) -> Option<ProgressEvent> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.record.pills.push(Pill {
            name: name.to_string(),
            time_of_day,
            done: false,
        });
        Some(ProgressEvent::PillsChanged {
            count: self.record.pills.len(),
        })
    }

    pub fn remove_pill(&mut self, index: usize) -> Option<ProgressEvent> {
        if index >= self.record.pills.len() {
            return None;
        }
        self.record.pills.remove(index);
        Some(ProgressEvent::PillsChanged {
            count: self.record.pills.len(),
        })
    }

    /// Replace the pill list; `done` state is kept by position.
    pub fn set_pills(&mut self, entries: &[(String, TimeOfDay)]) -> Option<ProgressEvent> {
        self.record.pills = entries
            .iter()
            .map(|(name, tod)| (name.trim(), tod))
            .filter(|(name, _)| !name.is_empty())
            .enumerate()
            .map(|(i, (name, tod))| Pill {
                name: name.to_string(),
                time_of_day: *tod,
                done: self.record.pills.get(i).map(|p| p.done).unwrap_or(false),
            })
            .collect();
        Some(ProgressEvent::PillsChanged {
            count: self.record.pills.len(),
        })
    }

    // ── Calendar ─────────────────────────────────────────────────────

    pub fn add_calendar_event(
        &mut self,
        date: NaiveDate,
        title: &str,
        time: Option<String>,
        color: EventColor,
    ) -> Option<ProgressEvent> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let id = Uuid::new_v4().to_string();
        self.record.calendar_events.insert(
            id.clone(),
            CalendarEvent {
                date,
                title: title.to_string(),
                time,
                color,
            },
        );
        Some(ProgressEvent::CalendarEventAdded {
            id,
            date,
            title: title.to_string(),
        })
    }

    pub fn remove_calendar_event(&mut self, id: &str) -> Option<ProgressEvent> {
        self.record.calendar_events.remove(id)?;
        Some(ProgressEvent::CalendarEventRemoved { id: id.to_string() })
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub fn set_layout(&mut self, layout: Layout) -> Option<ProgressEvent> {
        self.record.layout = layout;
        setting_changed("layout", &layout)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Option<ProgressEvent> {
        self.record.theme = theme;
        setting_changed("theme", &theme)
    }

    pub fn set_calendar_enabled(&mut self, enabled: bool) -> Option<ProgressEvent> {
        self.record.calendar_enabled = enabled;
        setting_changed("calendar_enabled", &enabled)
    }

    pub fn set_pills_enabled(&mut self, enabled: bool) -> Option<ProgressEvent> {
        self.record.pills_enabled = enabled;
        setting_changed("pills_enabled", &enabled)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Explicit "start new week": runs the weekly-boundary logic now,
    /// with the same neuron-history side effects as the automatic path.
    pub fn reset_week(&mut self, now: DateTime<Utc>) -> Option<ProgressEvent> {
        Some(roll_week(&mut self.record, monday_of(now.date_naive())))
    }

    /// Reset the whole record to the seeded defaults for today.
    pub fn clear_data(&mut self, now: DateTime<Utc>) -> Option<ProgressEvent> {
        self.record = ProgressRecord::bootstrap(now.date_naive());
        Some(ProgressEvent::DataCleared)
    }
}

fn reorder(habits: &mut Vec<Habit>, from: usize, to: usize) -> Option<()> {
    if from >= habits.len() || to >= habits.len() || from == to {
        return None;
    }
    let habit = habits.remove(from);
    habits.insert(to, habit);
    Some(())
}

/// Position-preserving list replacement: index i keeps its id when both
/// lists have an entry there. Returns the ids of the freshly created
/// habits.
fn replace_names(
    habits: &mut Vec<Habit>,
    names: &[String],
) -> Vec<crate::progress::record::HabitId> {
    let names: Vec<&str> = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect();
    let mut fresh = Vec::new();
    *habits = names
        .iter()
        .enumerate()
        .map(|(i, name)| match habits.get(i) {
            Some(existing) => Habit {
                id: existing.id,
                name: name.to_string(),
            },
            None => {
                let habit = Habit::new(*name);
                fresh.push(habit.id);
                habit
            }
        })
        .collect();
    fresh
}

fn setting_changed<T: serde::Serialize>(setting: &str, value: &T) -> Option<ProgressEvent> {
    Some(ProgressEvent::SettingChanged {
        setting: setting.to_string(),
        value: serde_json::to_value(value)
            .map(|v| v.to_string())
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn engine() -> ProgressEngine {
        let today: NaiveDate = "2026-01-07".parse().unwrap();
        ProgressEngine::new(ProgressRecord::bootstrap(today))
    }

    fn now() -> DateTime<Utc> {
        "2026-01-07T08:00:00Z".parse().unwrap()
    }

    #[test]
    fn toggle_ritual_stamps_on_full_completion() {
        let mut engine = engine();
        for i in 0..4 {
            engine.toggle_ritual(i, now()).unwrap();
        }
        assert!(engine.record().all_rituals_done());
        assert_eq!(engine.record().ritual_completed_at, Some(now()));

        // Un-checking one clears the stamp.
        engine.toggle_ritual(0, now()).unwrap();
        assert!(engine.record().ritual_completed_at.is_none());
    }

    #[test]
    fn toggle_ritual_out_of_range_is_noop() {
        let mut engine = engine();
        let before = engine.record().clone();
        assert!(engine.toggle_ritual(99, now()).is_none());
        assert_eq!(engine.record(), &before);
    }

    #[test]
    fn removal_keeps_other_habits_completion() {
        // Habits X, Y, Z; day 0 has X and Z completed. Removing Y must
        // leave X and Z checked, nothing else.
        let mut engine = engine();
        let names: Vec<String> = ["X", "Y", "Z"].iter().map(|s| s.to_string()).collect();
        engine.set_work_habits(&names).unwrap();
        engine.toggle_work_habit(0, 0).unwrap();
        engine.toggle_work_habit(0, 2).unwrap();

        engine.remove_work_habit(1).unwrap();
        let record = engine.record();
        assert_eq!(record.work_habits.len(), 2);
        assert_eq!(record.work_habits[0].name, "X");
        assert_eq!(record.work_habits[1].name, "Z");
        assert!(record.week[0].completed.contains(&record.work_habits[0].id));
        assert!(record.week[0].completed.contains(&record.work_habits[1].id));
        assert_eq!(record.week[0].completed.len(), 2);
    }

    #[test]
    fn reorder_preserves_completion_identity() {
        // Habits X, Y, Z; only Z is completed on day 0. Moving X to the
        // end gives Y, Z, X — the check must stay on Z.
        let mut engine = engine();
        let names: Vec<String> = ["X", "Y", "Z"].iter().map(|s| s.to_string()).collect();
        engine.set_work_habits(&names).unwrap();
        engine.toggle_work_habit(0, 2).unwrap();

        engine.reorder_work_habit(0, 2).unwrap();
        let record = engine.record();
        let order: Vec<&str> = record.work_habits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(order, ["Y", "Z", "X"]);
        let z = record.work_habits[1].id;
        assert!(record.week[0].completed.contains(&z));
        assert_eq!(record.week[0].completed.len(), 1);
    }

    #[test]
    fn set_habits_drops_state_of_truncated_positions() {
        let mut engine = engine();
        engine.toggle_work_habit(0, 2).unwrap();
        let survivors: Vec<String> = engine
            .record()
            .work_habits
            .iter()
            .take(2)
            .map(|h| h.name.clone())
            .collect();

        engine.set_work_habits(&survivors).unwrap();
        let record = engine.record();
        assert_eq!(record.work_habits.len(), 2);
        assert!(record.week[0].completed.is_empty());
        for cell in &record.week {
            assert_eq!(
                cell.enabled.as_ref().map(|e| e.len()),
                Some(2),
                "stale ids must not linger in enabled sets"
            );
        }
    }

    #[test]
    fn bulk_day_toggle_is_all_or_nothing() {
        let mut engine = engine();
        let id = engine.record().work_habits[0].id;
        // Enabled on days 0 and 1 only.
        for d in 2..7 {
            let enabled = engine.record.week[d].enabled.as_mut().unwrap();
            enabled.remove(&id);
        }

        // Not enabled on all of [0, 1, 2] -> added to all three.
        engine.toggle_habit_for_days(0, &[0, 1, 2]).unwrap();
        for d in [0, 1, 2] {
            assert!(engine.record().week[d].enabled.as_ref().unwrap().contains(&id));
        }

        // Now it is enabled on all three -> removed from all three.
        engine.toggle_habit_for_days(0, &[0, 1, 2]).unwrap();
        for d in [0, 1, 2] {
            assert!(!engine.record().week[d].enabled.as_ref().unwrap().contains(&id));
        }
    }

    #[test]
    fn bulk_day_toggle_rejects_bad_days_wholesale() {
        let mut engine = engine();
        let before = engine.record().clone();
        assert!(engine.toggle_habit_for_days(0, &[0, 9]).is_none());
        assert!(engine.toggle_habit_for_days(0, &[]).is_none());
        assert_eq!(engine.record(), &before);
    }

    #[test]
    fn added_habit_is_enabled_everywhere() {
        let mut engine = engine();
        engine.add_work_habit("  Ship weekly update  ").unwrap();
        let record = engine.record();
        let habit = record.work_habits.last().unwrap();
        assert_eq!(habit.name, "Ship weekly update");
        for cell in &record.week {
            assert!(cell.enabled.as_ref().unwrap().contains(&habit.id));
        }
    }

    #[test]
    fn blank_names_are_noops() {
        let mut engine = engine();
        let before = engine.record().clone();
        assert!(engine.add_work_habit("   ").is_none());
        assert!(engine.add_personal_habit("").is_none());
        assert!(engine.add_pill(" ", TimeOfDay::Morning).is_none());
        assert!(engine
            .add_calendar_event("2026-01-09".parse().unwrap(), "  ", None, EventColor::Blue)
            .is_none());
        assert_eq!(engine.record(), &before);
    }

    #[test]
    fn calendar_ids_are_unique_and_removable() {
        let mut engine = engine();
        let date = "2026-01-09".parse().unwrap();
        let a = match engine.add_calendar_event(date, "Standup", None, EventColor::Blue) {
            Some(ProgressEvent::CalendarEventAdded { id, .. }) => id,
            other => panic!("unexpected event: {other:?}"),
        };
        let b = match engine.add_calendar_event(date, "Review", Some("15:00".into()), EventColor::Red)
        {
            Some(ProgressEvent::CalendarEventAdded { id, .. }) => id,
            other => panic!("unexpected event: {other:?}"),
        };
        assert_ne!(a, b);
        assert_eq!(engine.record().calendar_events.len(), 2);

        engine.remove_calendar_event(&a).unwrap();
        assert!(engine.remove_calendar_event(&a).is_none());
        assert_eq!(engine.record().calendar_events.len(), 1);
    }

    #[test]
    fn set_rituals_keeps_done_by_position() {
        let mut engine = engine();
        engine.toggle_ritual(1, now()).unwrap();
        let texts: Vec<String> = ["First", "Second", ""].iter().map(|s| s.to_string()).collect();
        engine.set_rituals(&texts).unwrap();
        let record = engine.record();
        assert_eq!(record.rituals.len(), 2);
        assert!(!record.rituals[0].done);
        assert!(record.rituals[1].done);
    }

    #[test]
    fn explicit_week_reset_archives_like_the_boundary() {
        let mut engine = engine();
        let id = engine.record().personal_habits[0].id;
        for d in 0..5 {
            engine.record.personal_week[d].completed.insert(id);
        }

        let event = engine.reset_week(now()).unwrap();
        assert!(matches!(event, ProgressEvent::WeekRolled { neuron_count: 1, .. }));
        assert_eq!(engine.record().neuron_history.len(), 1);
        assert!(engine
            .record()
            .personal_week
            .iter()
            .all(|c| c.completed.is_empty()));
    }

    #[test]
    fn clear_data_restores_seeded_defaults() {
        let mut engine = engine();
        engine.toggle_ritual(0, now()).unwrap();
        engine.add_work_habit("Extra").unwrap();
        engine.clear_data(now()).unwrap();
        let record = engine.record();
        assert_eq!(record.work_habits.len(), 3);
        assert!(record.rituals.iter().all(|r| !r.done));
        assert!(record.statistics == Default::default());
    }
}
