use clap::{Subcommand, ValueEnum};

use humanos_core::TimeOfDay;

use super::{open_session, print_json, print_outcome, CliResult};

#[derive(Clone, Copy, ValueEnum)]
pub enum PillTime {
    Morning,
    Noon,
    Evening,
}

impl From<PillTime> for TimeOfDay {
    fn from(time: PillTime) -> Self {
        match time {
            PillTime::Morning => TimeOfDay::Morning,
            PillTime::Noon => TimeOfDay::Noon,
            PillTime::Evening => TimeOfDay::Evening,
        }
    }
}

#[derive(Subcommand)]
pub enum PillAction {
    /// List pills
    List,
    /// Add a pill
    Add {
        name: String,
        #[arg(long, value_enum, default_value = "morning")]
        time: PillTime,
    },
    /// Toggle a pill by position
    Toggle { index: usize },
    /// Remove a pill by position
    Remove { index: usize },
    /// Turn pill tracking on
    Enable,
    /// Turn pill tracking off
    Disable,
}

pub fn run(action: PillAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        PillAction::List => {
            print_json(&session.record()?.pills)?;
        }
        PillAction::Add { name, time } => {
            let event = session.apply(|engine, _| engine.add_pill(&name, time.into()))?;
            print_outcome(event)?;
        }
        PillAction::Toggle { index } => {
            let event = session.apply(|engine, _| engine.toggle_pill(index))?;
            print_outcome(event)?;
        }
        PillAction::Remove { index } => {
            let event = session.apply(|engine, _| engine.remove_pill(index))?;
            print_outcome(event)?;
        }
        PillAction::Enable => {
            let event = session.apply(|engine, _| engine.set_pills_enabled(true))?;
            print_outcome(event)?;
        }
        PillAction::Disable => {
            let event = session.apply(|engine, _| engine.set_pills_enabled(false))?;
            print_outcome(event)?;
        }
    }
    session.flush()?;
    Ok(())
}
