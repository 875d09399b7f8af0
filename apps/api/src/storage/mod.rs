//! Key-value persistence injected into the history and practice stores.
//!
//! `FileStore` backs the running service; `MemoryStore` backs tests.

pub mod file;
pub mod history;
pub mod memory;
pub mod practice;

use thiserror::Error;

pub use file::FileStore;
pub use history::{HistoryStore, SaveOutcome};
pub use memory::MemoryStore;
pub use practice::PracticeStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Minimal get/set contract over string values.
///
/// `get` returns `Ok(None)` for a key that was never written.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
