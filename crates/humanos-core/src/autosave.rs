//! Debounced save coalescing.
//!
//! Rapid successive mutations collapse into one outbound write after a
//! quiet window. The state is two explicit flags plus a deadline so the
//! behavior is assertable: `dirty` (unsaved changes exist), `in_flight`
//! (a save has started and not finished) and the debounce deadline.
//! A save that fails leaves the state dirty without re-arming the
//! deadline; the next mutation's `mark_dirty` re-attempts with the
//! latest state. No internal timer -- the caller drives `due()`.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone)]
pub struct Autosaver {
    debounce: Duration,
    dirty: bool,
    in_flight: bool,
    deadline: Option<DateTime<Utc>>,
}

impl Autosaver {
    pub fn new(debounce_secs: u64) -> Self {
        Self {
            debounce: Duration::seconds(debounce_secs as i64),
            dirty: false,
            in_flight: false,
            deadline: None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// A mutation happened: re-arm the quiet window.
    pub fn mark_dirty(&mut self, now: DateTime<Utc>) {
        self.dirty = true;
        self.deadline = Some(now + self.debounce);
    }

    /// Whether a save is due: dirty, nothing in flight, window elapsed.
    pub fn due(&self, now: DateTime<Utc>) -> bool {
        self.dirty && !self.in_flight && self.deadline.map(|d| now >= d).unwrap_or(false)
    }

    /// A save is starting; the snapshot it writes covers all dirt so far.
    pub fn begin(&mut self) {
        self.in_flight = true;
        self.dirty = false;
        self.deadline = None;
    }

    /// The save finished. On failure the state becomes dirty again but
    /// the deadline stays unarmed until the next mutation.
    pub fn finish(&mut self, ok: bool) {
        self.in_flight = false;
        if !ok {
            self.dirty = true;
        }
    }

    /// Forget all pending dirt (after an explicit clear).
    pub fn reset(&mut self) {
        self.dirty = false;
        self.in_flight = false;
        self.deadline = None;
    }
}
