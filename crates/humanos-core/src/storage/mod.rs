mod config;
pub mod memory;
pub mod sqlite;

pub use config::AppConfig;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Persistence gateway: an opaque key-value store holding at most one
/// JSON document per user. No transactions, no partial updates; the
/// engine writes the whole record every time.
pub trait ProgressStore {
    fn load(&self, user_id: &str) -> Result<Option<String>, StorageError>;
    fn save(&mut self, user_id: &str, document: &str) -> Result<(), StorageError>;
    fn clear(&mut self, user_id: &str) -> Result<(), StorageError>;
}

/// Returns `~/.config/humanos[-dev]/` based on HUMANOS_ENV.
///
/// Set HUMANOS_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HUMANOS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("humanos-dev")
    } else {
        base_dir.join("humanos")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
