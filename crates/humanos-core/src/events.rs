use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::progress::record::SunStatus;

/// Every observable state change produces an event.
/// Surface layers (CLI, a future dashboard) print or subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    RitualToggled {
        index: usize,
        done: bool,
        /// True when this toggle completed the whole checklist.
        all_done: bool,
    },
    RitualsReplaced {
        count: usize,
    },
    HabitToggled {
        grid: HabitGrid,
        day: usize,
        habit: String,
        completed: bool,
    },
    HabitAdded {
        grid: HabitGrid,
        name: String,
    },
    HabitRemoved {
        grid: HabitGrid,
        name: String,
    },
    HabitReordered {
        grid: HabitGrid,
        from: usize,
        to: usize,
    },
    HabitsReplaced {
        grid: HabitGrid,
        count: usize,
    },
    HabitDaysToggled {
        habit: String,
        days: Vec<usize>,
        enabled: bool,
    },
    PillToggled {
        index: usize,
        done: bool,
    },
    PillsChanged {
        count: usize,
    },
    CalendarEventAdded {
        id: String,
        date: NaiveDate,
        title: String,
    },
    CalendarEventRemoved {
        id: String,
    },
    /// Daily boundary crossed during normalization.
    DayRolled {
        date: NaiveDate,
        sun_status: SunStatus,
        rituals_done: u32,
    },
    /// Weekly boundary crossed (automatic or explicit reset).
    WeekRolled {
        week_start: NaiveDate,
        neuron_count: u32,
    },
    SettingChanged {
        setting: String,
        value: String,
    },
    DataCleared,
}

/// Which of the two weekly grids an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitGrid {
    Work,
    Personal,
}
