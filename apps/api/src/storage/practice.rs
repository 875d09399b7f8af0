use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::warn;

use crate::storage::history::SaveOutcome;
use crate::storage::KeyValueStore;

pub const PRACTICE_KEY: &str = "placement-practice-progress-v1";

/// Practice item index → completed.
pub type PracticeProgress = BTreeMap<u32, bool>;

/// Progress flags for the practice view, stored under their own key.
#[derive(Clone)]
pub struct PracticeStore {
    store: Arc<dyn KeyValueStore>,
}

impl PracticeStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Empty on a missing, unreadable or corrupt value.
    pub fn load(&self) -> PracticeProgress {
        match self.store.get(PRACTICE_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring corrupt practice progress: {e}");
                PracticeProgress::new()
            }),
            Ok(None) => PracticeProgress::new(),
            Err(e) => {
                warn!("Practice progress read failed: {e}");
                PracticeProgress::new()
            }
        }
    }

    /// Read-modify-write of a single flag. Returns the progress as it now stands in memory.
    pub fn set(&self, index: u32, done: bool) -> (PracticeProgress, SaveOutcome) {
        let mut progress = self.load();
        progress.insert(index, done);

        let outcome = match serde_json::to_string(&progress) {
            Ok(serialized) => match self.store.set(PRACTICE_KEY, &serialized) {
                Ok(()) => SaveOutcome::Saved,
                Err(e) => {
                    warn!("Practice progress write failed: {e}");
                    SaveOutcome::Failed(e.to_string())
                }
            },
            Err(e) => SaveOutcome::Failed(e.to_string()),
        };
        (progress, outcome)
    }
}
