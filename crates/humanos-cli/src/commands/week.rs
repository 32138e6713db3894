use clap::Subcommand;

use super::{open_session, print_outcome, CliResult};

#[derive(Subcommand)]
pub enum WeekAction {
    /// Archive the current week now and start a fresh one
    Reset,
}

pub fn run(action: WeekAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        WeekAction::Reset => {
            let event = session.apply(|engine, now| engine.reset_week(now))?;
            print_outcome(event)?;
        }
    }
    session.flush()?;
    Ok(())
}
