//! # HumanOS Core Library
//!
//! Core business logic for the HumanOS habit tracker. It implements a
//! CLI-first philosophy where all operations are available via a
//! standalone CLI binary, with any GUI dashboard being a thin layer over
//! the same library.
//!
//! ## Architecture
//!
//! - **Progress engine**: the user's rituals, weekly habit grids, pills,
//!   calendar and derived statistics, with pure reset/derivation rules
//!   applied on load and at day/week boundaries
//! - **Storage**: a narrow key-value gateway (SQLite locally, in-memory
//!   for tests) plus TOML-based configuration
//! - **Session**: one-shot load, mutation dispatch and debounced
//!   autosave over an injectable clock
//!
//! ## Key Components
//!
//! - [`ProgressEngine`]: mutation operations over the record
//! - [`Session`]: loaded/not-loaded facade with autosave
//! - [`SqliteStore`] / [`MemoryStore`]: persistence gateways
//! - [`Clock`]: injectable time source for deterministic tests

pub mod autosave;
pub mod clock;
pub mod error;
pub mod events;
pub mod progress;
pub mod session;
pub mod storage;

pub use autosave::Autosaver;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError};
pub use events::{HabitGrid, ProgressEvent};
pub use progress::{
    CalendarEvent, EventColor, Habit, HabitId, Layout, ProgressEngine, ProgressRecord, SunStatus,
    Theme, TimeOfDay, WeekSummary,
};
pub use session::Session;
pub use storage::{AppConfig, MemoryStore, ProgressStore, SqliteStore};
