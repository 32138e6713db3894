pub mod calendar;
pub mod config;
pub mod data;
pub mod habit;
pub mod pill;
pub mod ritual;
pub mod stats;
pub mod status;
pub mod ui;
pub mod week;

use humanos_core::{AppConfig, ProgressEvent, Session, SqliteStore, SystemClock};

pub(crate) type CliSession = Session<SqliteStore, SystemClock>;
pub(crate) type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the configured user's session: one load → mutate → flush cycle
/// per CLI invocation.
pub(crate) fn open_session() -> Result<CliSession, Box<dyn std::error::Error>> {
    let cfg = AppConfig::load_or_default();
    let store = SqliteStore::open()?;
    let mut session = Session::new(
        store,
        SystemClock,
        cfg.active_user,
        cfg.autosave_debounce_secs,
    );
    session.load()?;
    Ok(session)
}

/// Print the event a mutation produced, or a no-op marker when the
/// arguments didn't match anything (invalid index, blank name).
pub(crate) fn print_outcome(event: Option<ProgressEvent>) -> CliResult {
    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        None => println!("{{\"type\": \"noop\"}}"),
    }
    Ok(())
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
