use super::{open_session, print_json, CliResult};

/// Print the full normalized record as JSON.
pub fn run() -> CliResult {
    let mut session = open_session()?;
    print_json(session.record()?)?;
    // Persist any boundary resets the load applied.
    session.flush()?;
    Ok(())
}
