//! The user-progress state model: record, normalization, mutations and
//! derived statistics.

pub mod engine;
pub mod normalize;
pub mod record;
pub mod stats;

pub use engine::ProgressEngine;
pub use normalize::normalize;
pub use record::{
    CalendarEvent, DayCell, EventColor, Habit, HabitId, HabitResult, Layout, NeuronWeekRecord,
    Pill, ProgressRecord, Ritual, Statistics, SunDayRecord, SunStatus, Theme, TimeOfDay,
};
pub use stats::{day_streak, live_neuron_count, plan_percent, week_summary, WeekSummary};
