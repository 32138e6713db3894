use clap::Subcommand;

use super::{open_session, print_json, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Current week summary: plan percent, day streak, live neurons
    Show,
    /// Archived weekly neuron records
    Neurons,
    /// Archived daily sun records
    Suns,
}

pub fn run(action: StatsAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        StatsAction::Show => {
            print_json(&session.summary()?)?;
        }
        StatsAction::Neurons => {
            print_json(&session.record()?.neuron_history)?;
        }
        StatsAction::Suns => {
            print_json(&session.record()?.sun_history)?;
        }
    }
    // Normalization during load may have crossed a boundary; persist it.
    session.flush()?;
    Ok(())
}
