//! The persisted progress record and its subtypes.
//!
//! One JSON document per user holds the whole aggregate: daily rituals,
//! the two weekly habit grids, pills, calendar events, cumulative
//! statistics and the bounded history logs. Every field is
//! `#[serde(default)]`-able so a partial or legacy snapshot merges over
//! defaults field by field instead of failing the load.
//!
//! Habits carry stable opaque ids. The per-day completion and enabled
//! sets store ids, never positions, so reordering the habit list can
//! never swap completion state between habits.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cap on `neuron_history` entries (one per completed week).
pub const NEURON_HISTORY_CAP: usize = 52;
/// Cap on `sun_history` entries (one per completed day).
pub const SUN_HISTORY_CAP: usize = 30;
/// A personal habit is a neuron for a week once completed on this many days.
pub const NEURON_THRESHOLD_DAYS: u8 = 4;

/// Stable opaque habit identity, decoupled from display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct HabitId(Uuid);

impl HabitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

/// One fixed-order daily checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ritual {
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl Ritual {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

/// A named recurring task tracked per day-of-week. Display order is the
/// Vec order; identity is the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    #[serde(default)]
    pub id: HabitId,
    pub name: String,
}

impl Habit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: HabitId::new(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Noon,
    Evening,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pill {
    pub name: String,
    pub time_of_day: TimeOfDay,
    #[serde(default)]
    pub done: bool,
}

/// One day of a weekly grid.
///
/// `enabled: None` means "all habits apply to this day". Normalization
/// materializes it for the work grid so downstream math never
/// special-cases the unset form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    #[serde(default)]
    pub day_name: String,
    #[serde(default)]
    pub date_label: String,
    #[serde(default)]
    pub completed: BTreeSet<HabitId>,
    #[serde(default)]
    pub enabled: Option<BTreeSet<HabitId>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Blue,
    Green,
    Red,
    Yellow,
    Purple,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub date: NaiveDate,
    pub title: String,
    /// "HH:mm", optional.
    #[serde(default)]
    pub time: Option<String>,
    pub color: EventColor,
}

/// Cumulative counters rolled up at day/week boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub total_rituals_done: u64,
    #[serde(default)]
    pub total_work_habits_done: u64,
    #[serde(default)]
    pub total_personal_habits_done: u64,
    #[serde(default)]
    pub total_pills_done: u64,
    /// Days on which every ritual was completed.
    #[serde(default)]
    pub perfect_days: u32,
    #[serde(default)]
    pub current_streak: u32,
    /// Running max; never decreases.
    #[serde(default)]
    pub longest_streak: u32,
}

/// Per-habit outcome inside a completed week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitResult {
    pub name: String,
    pub completed_days: u8,
    pub is_neuron: bool,
}

/// Archived outcome of one completed personal-habit week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeuronWeekRecord {
    pub week_start_label: String,
    pub week_end_label: String,
    pub iso_date: NaiveDate,
    pub neuron_count: u32,
    pub total_habits: u32,
    pub habit_results: Vec<HabitResult>,
    /// Snapshot of the week's personal grid at rollover time.
    pub week: Vec<DayCell>,
}

/// Daily rating of morning-ritual completion quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SunStatus {
    /// All rituals done, finished between 06:00 and 10:00.
    Burning,
    /// All rituals done outside the window, or at most 2 missed with
    /// at least 1 done.
    Warm,
    Gray,
}

/// Archived outcome of one completed day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SunDayRecord {
    pub iso_date: NaiveDate,
    pub status: SunStatus,
    pub completed_rituals: Vec<String>,
    pub total_rituals: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Standard,
    Focus,
}

fn default_true() -> bool {
    true
}

fn default_schema_version() -> u32 {
    1
}

/// The single persisted aggregate, one per user.
///
/// Deserializing a partial document yields defaults for missing fields;
/// unknown fields are ignored. Watermarks are `None` on a fresh or
/// pre-watermark document, which normalization treats as "stamp today,
/// no roll-up".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub rituals: Vec<Ritual>,
    #[serde(default)]
    pub work_habits: Vec<Habit>,
    #[serde(default)]
    pub personal_habits: Vec<Habit>,
    #[serde(default)]
    pub pills: Vec<Pill>,
    /// Work-habit grid, 7 Monday-first cells.
    #[serde(default)]
    pub week: Vec<DayCell>,
    /// Personal-habit grid, 7 Monday-first cells.
    #[serde(default)]
    pub personal_week: Vec<DayCell>,
    #[serde(default)]
    pub calendar_events: BTreeMap<String, CalendarEvent>,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub neuron_history: Vec<NeuronWeekRecord>,
    #[serde(default)]
    pub sun_history: Vec<SunDayRecord>,
    /// Daily watermark: last day the ritual checklist was reset for.
    #[serde(default)]
    pub last_reset_date: Option<NaiveDate>,
    /// Weekly watermark: Monday of the stored week.
    #[serde(default)]
    pub week_start: Option<NaiveDate>,
    /// Stamped when all rituals first become done on a day.
    #[serde(default)]
    pub ritual_completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_true")]
    pub calendar_enabled: bool,
    #[serde(default)]
    pub pills_enabled: bool,
}

// Must agree with the per-field serde defaults so an empty document and
// `default()` produce the same record.
impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            rituals: Vec::new(),
            work_habits: Vec::new(),
            personal_habits: Vec::new(),
            pills: Vec::new(),
            week: Vec::new(),
            personal_week: Vec::new(),
            calendar_events: BTreeMap::new(),
            statistics: Statistics::default(),
            neuron_history: Vec::new(),
            sun_history: Vec::new(),
            last_reset_date: None,
            week_start: None,
            ritual_completed_at: None,
            layout: Layout::default(),
            theme: Theme::default(),
            calendar_enabled: true,
            pills_enabled: false,
        }
    }
}

/// Monday of the week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Short display label for a date, e.g. "Jan 5".
pub fn date_label(date: NaiveDate) -> String {
    format!("{} {}", date.format("%b"), date.day())
}

fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Generate a fresh 7-day Monday-first grid for the week starting at
/// `monday`. Every cell gets the given enabled set.
pub fn fresh_week(monday: NaiveDate, enabled: Option<&BTreeSet<HabitId>>) -> Vec<DayCell> {
    (0..7)
        .map(|i| {
            let date = monday + Duration::days(i);
            DayCell {
                day_name: day_name(date.weekday()).to_string(),
                date_label: date_label(date),
                completed: BTreeSet::new(),
                enabled: enabled.cloned(),
            }
        })
        .collect()
}

impl ProgressRecord {
    /// Seeded record for a first login (store miss): the default
    /// dashboard content with today's grids and watermarks.
    pub fn bootstrap(today: NaiveDate) -> Self {
        let work_habits = vec![
            Habit::new("Deep work block"),
            Habit::new("Inbox zero"),
            Habit::new("Daily review"),
        ];
        let all_work: BTreeSet<HabitId> = work_habits.iter().map(|h| h.id).collect();
        let monday = monday_of(today);
        Self {
            schema_version: default_schema_version(),
            rituals: vec![
                Ritual::new("Wake up before 7:00"),
                Ritual::new("Morning exercise"),
                Ritual::new("Cold shower"),
                Ritual::new("Plan the day"),
            ],
            work_habits,
            personal_habits: vec![
                Habit::new("Read 20 pages"),
                Habit::new("Walk 30 minutes"),
                Habit::new("No sugar"),
            ],
            pills: Vec::new(),
            week: fresh_week(monday, Some(&all_work)),
            personal_week: fresh_week(monday, None),
            calendar_events: BTreeMap::new(),
            statistics: Statistics::default(),
            neuron_history: Vec::new(),
            sun_history: Vec::new(),
            last_reset_date: Some(today),
            week_start: Some(monday),
            ritual_completed_at: None,
            layout: Layout::Vertical,
            theme: Theme::Standard,
            calendar_enabled: true,
            pills_enabled: false,
        }
    }

    /// All ids in the given habit list.
    pub fn habit_ids(habits: &[Habit]) -> BTreeSet<HabitId> {
        habits.iter().map(|h| h.id).collect()
    }

    /// True when the checklist is non-empty and every ritual is done.
    pub fn all_rituals_done(&self) -> bool {
        !self.rituals.is_empty() && self.rituals.iter().all(|r| r.done)
    }
}
