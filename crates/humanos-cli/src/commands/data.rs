use clap::Subcommand;

use super::{open_session, CliResult};

#[derive(Subcommand)]
pub enum DataAction {
    /// Reset the record to defaults and delete the stored document
    Clear,
}

pub fn run(action: DataAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        DataAction::Clear => {
            session.clear()?;
            println!("{{\"type\": \"data_cleared\"}}");
        }
    }
    Ok(())
}
