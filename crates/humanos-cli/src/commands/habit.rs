use clap::Subcommand;
use serde::Serialize;

use humanos_core::ProgressRecord;

use super::{open_session, print_json, print_outcome, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits with their per-day completion
    List {
        /// Operate on the personal grid instead of the work grid
        #[arg(long)]
        personal: bool,
    },
    /// Append a habit
    Add {
        name: String,
        #[arg(long)]
        personal: bool,
    },
    /// Remove a habit by position
    Remove {
        index: usize,
        #[arg(long)]
        personal: bool,
    },
    /// Move a habit to a new position
    Reorder {
        from: usize,
        to: usize,
        #[arg(long)]
        personal: bool,
    },
    /// Replace the whole habit list (week state kept by position)
    Set {
        #[arg(required = true)]
        names: Vec<String>,
        #[arg(long)]
        personal: bool,
    },
    /// Toggle a habit's completion for one day
    Toggle {
        /// Day of week, 0 = Monday
        day: usize,
        /// Habit position
        index: usize,
        #[arg(long)]
        personal: bool,
    },
    /// Bulk-toggle which days a work habit applies to: enabled on all
    /// targeted days removes it from all of them, otherwise adds it
    Days {
        /// Habit position
        index: usize,
        /// Targeted days, 0 = Monday
        #[arg(long, value_delimiter = ',', required = true)]
        days: Vec<usize>,
    },
}

/// One habit joined with its week state, for display.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HabitRow {
    name: String,
    completed_days: Vec<usize>,
    enabled_days: Vec<usize>,
}

fn rows(record: &ProgressRecord, personal: bool) -> Vec<HabitRow> {
    let (habits, week) = if personal {
        (&record.personal_habits, &record.personal_week)
    } else {
        (&record.work_habits, &record.week)
    };
    habits
        .iter()
        .map(|habit| HabitRow {
            name: habit.name.clone(),
            completed_days: week
                .iter()
                .enumerate()
                .filter(|(_, cell)| cell.completed.contains(&habit.id))
                .map(|(day, _)| day)
                .collect(),
            enabled_days: week
                .iter()
                .enumerate()
                .filter(|(_, cell)| {
                    cell.enabled
                        .as_ref()
                        .map(|e| e.contains(&habit.id))
                        .unwrap_or(true)
                })
                .map(|(day, _)| day)
                .collect(),
        })
        .collect()
}

pub fn run(action: HabitAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        HabitAction::List { personal } => {
            print_json(&rows(session.record()?, personal))?;
        }
        HabitAction::Add { name, personal } => {
            let event = session.apply(|engine, _| {
                if personal {
                    engine.add_personal_habit(&name)
                } else {
                    engine.add_work_habit(&name)
                }
            })?;
            print_outcome(event)?;
        }
        HabitAction::Remove { index, personal } => {
            let event = session.apply(|engine, _| {
                if personal {
                    engine.remove_personal_habit(index)
                } else {
                    engine.remove_work_habit(index)
                }
            })?;
            print_outcome(event)?;
        }
        HabitAction::Reorder { from, to, personal } => {
            let event = session.apply(|engine, _| {
                if personal {
                    engine.reorder_personal_habit(from, to)
                } else {
                    engine.reorder_work_habit(from, to)
                }
            })?;
            print_outcome(event)?;
        }
        HabitAction::Set { names, personal } => {
            let event = session.apply(|engine, _| {
                if personal {
                    engine.set_personal_habits(&names)
                } else {
                    engine.set_work_habits(&names)
                }
            })?;
            print_outcome(event)?;
        }
        HabitAction::Toggle { day, index, personal } => {
            let event = session.apply(|engine, _| {
                if personal {
                    engine.toggle_personal_habit(day, index)
                } else {
                    engine.toggle_work_habit(day, index)
                }
            })?;
            print_outcome(event)?;
        }
        HabitAction::Days { index, days } => {
            let event = session.apply(|engine, _| engine.toggle_habit_for_days(index, &days))?;
            print_outcome(event)?;
        }
    }
    session.flush()?;
    Ok(())
}
