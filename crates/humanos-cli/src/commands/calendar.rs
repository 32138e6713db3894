use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};

use humanos_core::EventColor;

use super::{open_session, print_json, print_outcome, CliResult};

#[derive(Clone, Copy, ValueEnum)]
pub enum Color {
    Blue,
    Green,
    Red,
    Yellow,
    Purple,
}

impl From<Color> for EventColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Blue => EventColor::Blue,
            Color::Green => EventColor::Green,
            Color::Red => EventColor::Red,
            Color::Yellow => EventColor::Yellow,
            Color::Purple => EventColor::Purple,
        }
    }
}

#[derive(Subcommand)]
pub enum CalendarAction {
    /// List events
    List,
    /// Add an event
    Add {
        /// Event day (YYYY-MM-DD)
        date: NaiveDate,
        title: String,
        /// Optional time of day (HH:mm)
        #[arg(long)]
        time: Option<String>,
        #[arg(long, value_enum, default_value = "blue")]
        color: Color,
    },
    /// Remove an event by id
    Remove { id: String },
    /// Show the calendar panel
    Enable,
    /// Hide the calendar panel
    Disable,
}

pub fn run(action: CalendarAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        CalendarAction::List => {
            print_json(&session.record()?.calendar_events)?;
        }
        CalendarAction::Add {
            date,
            title,
            time,
            color,
        } => {
            let event = session
                .apply(|engine, _| engine.add_calendar_event(date, &title, time, color.into()))?;
            print_outcome(event)?;
        }
        CalendarAction::Remove { id } => {
            let event = session.apply(|engine, _| engine.remove_calendar_event(&id))?;
            print_outcome(event)?;
        }
        CalendarAction::Enable => {
            let event = session.apply(|engine, _| engine.set_calendar_enabled(true))?;
            print_outcome(event)?;
        }
        CalendarAction::Disable => {
            let event = session.apply(|engine, _| engine.set_calendar_enabled(false))?;
            print_outcome(event)?;
        }
    }
    session.flush()?;
    Ok(())
}
