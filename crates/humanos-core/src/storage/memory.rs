//! In-memory progress store for tests and ephemeral sessions.

use std::collections::HashMap;

use super::ProgressStore;
use crate::error::StorageError;

/// HashMap-backed store with a fault-injection switch so save-failure
/// handling is testable without a real backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: HashMap<String, String>,
    fail_saves: bool,
    save_calls: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail until switched back.
    pub fn fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// Number of `save` calls attempted, including failed ones.
    pub fn save_calls(&self) -> u32 {
        self.save_calls
    }

    /// Seed a document directly, bypassing the save counter.
    pub fn seed(&mut self, user_id: &str, document: &str) {
        self.documents.insert(user_id.to_string(), document.to_string());
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self, user_id: &str) -> Result<Option<String>, StorageError> {
        Ok(self.documents.get(user_id).cloned())
    }

    fn save(&mut self, user_id: &str, document: &str) -> Result<(), StorageError> {
        self.save_calls += 1;
        if self.fail_saves {
            return Err(StorageError::Backend("injected save failure".into()));
        }
        self.documents.insert(user_id.to_string(), document.to_string());
        Ok(())
    }

    fn clear(&mut self, user_id: &str) -> Result<(), StorageError> {
        self.documents.remove(user_id);
        Ok(())
    }
}
