use clap::Subcommand;

use super::{open_session, print_json, print_outcome, CliResult};

#[derive(Subcommand)]
pub enum RitualAction {
    /// List today's checklist
    List,
    /// Toggle one ritual by position
    Toggle {
        /// Zero-based position in the checklist
        index: usize,
    },
    /// Replace the checklist (done state kept by position)
    Set {
        /// New checklist texts, in display order
        #[arg(required = true)]
        texts: Vec<String>,
    },
}

pub fn run(action: RitualAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        RitualAction::List => {
            print_json(&session.record()?.rituals)?;
        }
        RitualAction::Toggle { index } => {
            let event = session.apply(|engine, now| engine.toggle_ritual(index, now))?;
            print_outcome(event)?;
        }
        RitualAction::Set { texts } => {
            let event = session.apply(|engine, _| engine.set_rituals(&texts))?;
            print_outcome(event)?;
        }
    }
    session.flush()?;
    Ok(())
}
