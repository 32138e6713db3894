//! Session facade: one user's loaded record plus its autosave loop.
//!
//! A session starts unloaded; the one-shot `load()` fetches the stored
//! document (or bootstraps defaults on a miss), merges it over defaults
//! and normalizes it against the injected clock. Every mutation that
//! changed state marks the session dirty; the caller drives `poll()` for
//! the debounced save, or `flush()` to write immediately. Mutating an
//! unloaded session is an error so callers never act on defaults before
//! the load resolves.

use chrono::{DateTime, Utc};

use crate::autosave::Autosaver;
use crate::clock::Clock;
use crate::error::{CoreError, Result};
use crate::events::ProgressEvent;
use crate::progress::stats::{week_summary, WeekSummary};
use crate::progress::{normalize, ProgressEngine, ProgressRecord};
use crate::storage::ProgressStore;

pub struct Session<S: ProgressStore, C: Clock> {
    store: S,
    clock: C,
    user_id: String,
    engine: Option<ProgressEngine>,
    autosaver: Autosaver,
}

impl<S: ProgressStore, C: Clock> Session<S, C> {
    pub fn new(store: S, clock: C, user_id: impl Into<String>, debounce_secs: u64) -> Self {
        Self {
            store,
            clock,
            user_id: user_id.into(),
            engine: None,
            autosaver: Autosaver::new(debounce_secs),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.engine.is_some()
    }

    /// Consume the session, returning its store. Tests use this to
    /// simulate a reload against the same backing data.
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn is_dirty(&self) -> bool {
        self.autosaver.is_dirty()
    }

    /// One-shot load: fetch, merge over defaults, normalize.
    ///
    /// A missing document bootstraps the seeded defaults; a document
    /// that fails to parse does the same (the session never fails on a
    /// malformed snapshot). A bootstrapped record and any boundary
    /// resets that fired during normalization mark the session dirty
    /// so they reach the store.
    ///
    /// # Errors
    /// Returns an error only when the store itself fails to load.
    pub fn load(&mut self) -> Result<Vec<ProgressEvent>> {
        let now = self.clock.now();
        let (mut record, bootstrapped) = match self.store.load(&self.user_id)? {
            Some(document) => match serde_json::from_str::<ProgressRecord>(&document) {
                Ok(record) => (record, false),
                Err(_) => (ProgressRecord::bootstrap(now.date_naive()), true),
            },
            None => (ProgressRecord::bootstrap(now.date_naive()), true),
        };
        let events = normalize(&mut record, now);
        self.engine = Some(ProgressEngine::new(record));
        if bootstrapped || !events.is_empty() {
            self.autosaver.mark_dirty(now);
        }
        Ok(events)
    }

    pub fn record(&self) -> Result<&ProgressRecord> {
        Ok(self.engine.as_ref().ok_or(CoreError::NotLoaded)?.record())
    }

    pub fn summary(&self) -> Result<WeekSummary> {
        let record = self.record()?;
        Ok(week_summary(record, self.clock.today()))
    }

    /// Apply one mutation. A command that changed state (returned an
    /// event) re-arms the autosave window.
    ///
    /// # Errors
    /// Returns `NotLoaded` before the one-shot load has run.
    pub fn apply<F>(&mut self, op: F) -> Result<Option<ProgressEvent>>
    where
        F: FnOnce(&mut ProgressEngine, DateTime<Utc>) -> Option<ProgressEvent>,
    {
        let engine = self.engine.as_mut().ok_or(CoreError::NotLoaded)?;
        let now = self.clock.now();
        let event = op(engine, now);
        if event.is_some() {
            self.autosaver.mark_dirty(now);
        }
        Ok(event)
    }

    /// Drive the debounced save. Returns true when a save was written.
    ///
    /// # Errors
    /// A failed save is surfaced to the caller; the in-memory state
    /// stays authoritative and dirty, and the next mutation's window
    /// re-attempts with the latest state.
    pub fn poll(&mut self) -> Result<bool> {
        if !self.autosaver.due(self.clock.now()) {
            return Ok(false);
        }
        self.write_now()?;
        Ok(true)
    }

    /// Write immediately if dirty, ignoring the debounce window. The
    /// CLI calls this at the end of each invocation.
    ///
    /// # Errors
    /// Same contract as `poll`.
    pub fn flush(&mut self) -> Result<bool> {
        if !self.autosaver.is_dirty() || self.autosaver.in_flight() {
            return Ok(false);
        }
        self.write_now()?;
        Ok(true)
    }

    fn write_now(&mut self) -> Result<()> {
        let engine = self.engine.as_ref().ok_or(CoreError::NotLoaded)?;
        let document = serde_json::to_string(engine.record())?;
        self.autosaver.begin();
        let result = self.store.save(&self.user_id, &document);
        self.autosaver.finish(result.is_ok());
        result?;
        Ok(())
    }

    /// Explicit account data-clear: reset the record to defaults and
    /// delete the stored document.
    ///
    /// # Errors
    /// Returns `NotLoaded` before load, or the store's error.
    pub fn clear(&mut self) -> Result<()> {
        let now = self.clock.now();
        let engine = self.engine.as_mut().ok_or(CoreError::NotLoaded)?;
        engine.clear_data(now);
        self.store.clear(&self.user_id)?;
        self.autosaver.reset();
        Ok(())
    }
}
