use std::sync::Arc;

use crate::errors::AppError;
use crate::storage::{HistoryStore, KeyValueStore, PracticeStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub history: HistoryStore,
    pub practice: PracticeStore,
}

impl AppState {
    /// Both stores share one key-value backend, under different keys.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            history: HistoryStore::new(store.clone()),
            practice: PracticeStore::new(store),
        }
    }
}

/// Runs a synchronous store call via `tokio::task::spawn_blocking`.
///
/// Store calls do file I/O; handlers must not run them on the async executor.
pub async fn run_blocking<T, F>(task: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed: {e}")))
}
