//! History store: the ordered log of analysis entries under a single key.
//!
//! Every call round-trips through the injected `KeyValueStore`; nothing is cached.
//! Writes are read-modify-write of the whole log with no transaction, so with two
//! concurrent writers the later save wins.
//!
//! Public reads never fail: absent, unreadable or corrupt data loads as an empty
//! history, and entries are decoded one by one so a single malformed entry does not
//! hide the rest. Writes never clobber data they could not read: a corrupt log is
//! copied to `HISTORY_BACKUP_KEY` first, and an unreadable one is left alone.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::analysis::readiness::Confidence;
use crate::models::history::HistoryEntry;
use crate::storage::{KeyValueStore, StoreError};

pub const HISTORY_KEY: &str = "placement-readiness-history-v1";
/// Where an undecodable history value is preserved before it is replaced.
pub const HISTORY_BACKUP_KEY: &str = "placement-readiness-history-v1-corrupt";

/// What a history read found.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Vec<HistoryEntry>),
    /// Nothing stored yet (or an empty value).
    Absent,
    /// Stored value is not a JSON array.
    Corrupt(String),
    /// The store itself failed.
    Unreadable(String),
}

/// Result of a history write. Failures are reported, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Failed(String),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved)
    }
}

/// Decodes the log element by element. Only a value that is not a JSON array is an
/// error; elements that are not entry objects are dropped.
fn decode_history(raw: &str) -> Result<Vec<HistoryEntry>, StoreError> {
    let items: Vec<Value> = serde_json::from_str(raw)?;
    let total = items.len();

    let entries: Vec<HistoryEntry> = items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            if !item.is_object() {
                warn!("Skipping history element {idx}: not an object");
                return None;
            }
            match serde_json::from_value(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping history element {idx}: {e}");
                    None
                }
            }
        })
        .collect();

    if entries.len() < total {
        debug!("Decoded {} of {total} history elements", entries.len());
    }
    Ok(entries)
}

#[derive(Clone)]
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return LoadOutcome::Absent,
            Err(e) => {
                warn!("History read failed: {e}");
                return LoadOutcome::Unreadable(e.to_string());
            }
        };

        match decode_history(&raw) {
            Ok(entries) => LoadOutcome::Loaded(entries),
            Err(e) => {
                warn!("Ignoring corrupt history ({} bytes): {e}", raw.len());
                LoadOutcome::Corrupt(e.to_string())
            }
        }
    }

    /// All entries, oldest first. Empty on any read problem.
    pub fn load(&self) -> Vec<HistoryEntry> {
        match self.load_outcome() {
            LoadOutcome::Loaded(entries) => entries,
            LoadOutcome::Absent => Vec::new(),
            LoadOutcome::Corrupt(reason) | LoadOutcome::Unreadable(reason) => {
                debug!("Serving empty history: {reason}");
                Vec::new()
            }
        }
    }

    /// Current entries for a read-modify-write.
    ///
    /// A corrupt value is copied to `HISTORY_BACKUP_KEY` before the caller may replace
    /// it. An unreadable store, or a failed backup, aborts the write.
    fn load_for_write(&self) -> Result<Vec<HistoryEntry>, SaveOutcome> {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return Ok(Vec::new()),
            Err(e) => {
                warn!("History read failed, not writing: {e}");
                return Err(SaveOutcome::Failed(format!("history unreadable: {e}")));
            }
        };

        match decode_history(&raw) {
            Ok(entries) => Ok(entries),
            Err(decode_err) => {
                if let Err(e) = self.store.set(HISTORY_BACKUP_KEY, &raw) {
                    warn!("Could not back up corrupt history, not writing: {e}");
                    return Err(SaveOutcome::Failed(format!(
                        "corrupt history could not be backed up: {e}"
                    )));
                }
                warn!("Corrupt history ({decode_err}) moved to {HISTORY_BACKUP_KEY}");
                Ok(Vec::new())
            }
        }
    }

    /// Replaces the stored log with `entries`.
    pub fn save(&self, entries: &[HistoryEntry]) -> SaveOutcome {
        let written = serde_json::to_string(entries)
            .map_err(StoreError::from)
            .and_then(|serialized| self.store.set(HISTORY_KEY, &serialized));
        match written {
            Ok(()) => SaveOutcome::Saved,
            Err(e) => {
                warn!("History write failed: {e}");
                SaveOutcome::Failed(e.to_string())
            }
        }
    }

    pub fn append(&self, entry: HistoryEntry) -> SaveOutcome {
        let mut entries = match self.load_for_write() {
            Ok(entries) => entries,
            Err(outcome) => return outcome,
        };
        info!("Appending history entry {} ({} existing)", entry.id, entries.len());
        entries.push(entry);
        self.save(&entries)
    }

    pub fn find(&self, id: &str) -> Option<HistoryEntry> {
        self.load().into_iter().find(|entry| entry.id == id)
    }

    /// The entry with `id`, or the latest entry when `id` is absent or unknown.
    pub fn select(&self, id: Option<&str>) -> Option<HistoryEntry> {
        let mut entries = self.load();
        if let Some(id) = id {
            if let Some(pos) = entries.iter().position(|entry| entry.id == id) {
                return Some(entries.swap_remove(pos));
            }
        }
        entries.pop()
    }

    /// Writes `entry` over the stored entry with the same id. Entries with an
    /// unknown id are not inserted.
    pub fn replace(&self, entry: &HistoryEntry) -> SaveOutcome {
        let mut entries = match self.load_for_write() {
            Ok(entries) => entries,
            Err(outcome) => return outcome,
        };
        match entries.iter_mut().find(|existing| existing.id == entry.id) {
            Some(existing) => *existing = entry.clone(),
            None => {
                return SaveOutcome::Failed(format!("no history entry with id {}", entry.id))
            }
        }
        self.save(&entries)
    }

    /// Selects an entry (see `select`), normalizes it and writes it back.
    ///
    /// The normalized entry is returned even when the write-back fails.
    pub fn open(&self, id: Option<&str>) -> Option<(HistoryEntry, SaveOutcome)> {
        let mut entry = self.select(id)?;
        entry.normalize();
        let outcome = self.replace(&entry);
        Some((entry, outcome))
    }

    /// Loads entry `id`, applies the confidence toggle and persists it.
    ///
    /// `None` when there is no such entry or the skill was not extracted for it.
    pub fn set_skill_confidence(
        &self,
        id: &str,
        skill: &str,
        value: Confidence,
    ) -> Option<(HistoryEntry, SaveOutcome)> {
        let mut entry = self.find(id)?;
        entry.normalize();
        if !entry.set_skill_confidence(skill, value) {
            return None;
        }
        let outcome = self.replace(&entry);
        Some((entry, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::generator::{build_entry, AnalyzeRequest};
    use crate::storage::memory::{FailingStore, MemoryStore};
    use chrono::{DateTime, Utc};

    fn memory_history() -> (Arc<MemoryStore>, HistoryStore) {
        let backing = Arc::new(MemoryStore::new());
        let history = HistoryStore::new(backing.clone());
        (backing, history)
    }

    fn entry(id: &str, jd: &str) -> HistoryEntry {
        let created_at: DateTime<Utc> = DateTime::from_timestamp_millis(1_760_000_000_000).unwrap();
        build_entry(
            &AnalyzeRequest {
                jd_text: jd.to_string(),
                company: "Acme".to_string(),
                role: String::new(),
            },
            id.to_string(),
            created_at,
        )
    }

    #[test]
    fn test_absent_history_loads_empty() {
        let (_, history) = memory_history();
        assert_eq!(history.load_outcome(), LoadOutcome::Absent);
        assert!(history.load().is_empty());
    }

    #[test]
    fn test_corrupt_or_non_array_history_loads_empty() {
        let (backing, history) = memory_history();
        for raw in ["{not json", r#"{"id":"x"}"#, "42"] {
            backing.set(HISTORY_KEY, raw).unwrap();
            assert!(
                matches!(history.load_outcome(), LoadOutcome::Corrupt(_)),
                "expected corrupt for {raw}"
            );
            assert!(history.load().is_empty());
        }

        backing.set(HISTORY_KEY, "[1, 2]").unwrap();
        assert_eq!(history.load_outcome(), LoadOutcome::Loaded(Vec::new()));
    }

    #[test]
    fn test_malformed_entry_is_defaulted_and_kept_by_append() {
        let (backing, history) = memory_history();
        backing
            .set(
                HISTORY_KEY,
                r#"[{"id":"1-good00","jdText":"React","readinessScore":40},
                    {"id":"2-bad000","extractedSkills":null,"createdAt":"yesterday","readinessScore":61.5},
                    "not an entry"]"#,
            )
            .unwrap();

        let loaded = history.load();
        let ids: Vec<&str> = loaded.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1-good00", "2-bad000"]);
        assert!(!loaded[1].extracted_skills.has_any);
        assert_eq!(loaded[1].readiness_score, 62);

        assert!(history.append(entry("3-cccccc", "Docker")).is_saved());
        let ids: Vec<String> = history.load().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["1-good00", "2-bad000", "3-cccccc"]);
    }

    #[test]
    fn test_append_over_corrupt_history_backs_it_up_first() {
        let (backing, history) = memory_history();
        backing.set(HISTORY_KEY, "{not json").unwrap();

        assert!(history.append(entry("1-aaaaaa", "React")).is_saved());
        assert_eq!(
            backing.get(HISTORY_BACKUP_KEY).unwrap().as_deref(),
            Some("{not json")
        );
        assert_eq!(history.load().len(), 1);
    }

    #[test]
    fn test_unreadable_history_is_never_overwritten() {
        let failing = Arc::new(FailingStore {
            fail_reads: true,
            ..Default::default()
        });
        failing.backing.set(HISTORY_KEY, "[]").unwrap();
        let history = HistoryStore::new(failing.clone());

        let outcome = history.append(entry("1-aaaaaa", "React"));
        assert!(matches!(outcome, SaveOutcome::Failed(ref msg) if msg.contains("unreadable")));
        assert_eq!(failing.backing.get(HISTORY_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_round_trip_of_externally_written_history_is_byte_identical() {
        let raw = concat!(
            r#"[{"id":"1700000000000-k3x9qz","createdAt":"2023-11-14T22:13:20.000Z","#,
            r#""company":"Acme","role":"SDE","jdText":"React and SQL","#,
            r#""extractedSkills":{"categories":{"coreCs":[],"languages":[],"web":["React"],"#,
            r#""data":["SQL"],"cloudDevops":[],"testing":[]},"categoriesPresent":["web","data"],"#,
            r#""hasAny":true,"fallbackLabel":null},"#,
            r#""checklist":[{"round":"Round 1: Aptitude / Basics","items":["Revise aptitude."]}],"#,
            r#""plan":[{"day":"Day 1","focus":"Basics + Core CS","items":["Review basics."]}],"#,
            r#""questions":["Q1?"],"readinessScore":49,"baseReadinessScore":49,"#,
            r#""skillConfidenceMap":{"SQL":"know","React":"practice"},"source":"import"}]"#,
        );
        let (backing, history) = memory_history();
        backing.set(HISTORY_KEY, raw).unwrap();

        assert!(history.save(&history.load()).is_saved());
        assert_eq!(backing.get(HISTORY_KEY).unwrap().as_deref(), Some(raw));
    }

    #[test]
    fn test_unreadable_store_loads_empty() {
        let history = HistoryStore::new(Arc::new(FailingStore {
            fail_reads: true,
            ..Default::default()
        }));
        assert!(matches!(history.load_outcome(), LoadOutcome::Unreadable(_)));
        assert!(history.load().is_empty());
    }

    #[test]
    fn test_failed_write_is_reported_not_raised() {
        let history = HistoryStore::new(Arc::new(FailingStore {
            fail_writes: true,
            ..Default::default()
        }));
        let outcome = history.append(entry("1-aaaaaa", "React"));
        assert!(matches!(outcome, SaveOutcome::Failed(ref msg) if msg.contains("quota")));
        assert!(history.load().is_empty());
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let (_, history) = memory_history();
        assert!(history.append(entry("1-aaaaaa", "React")).is_saved());
        assert!(history.append(entry("2-bbbbbb", "SQL")).is_saved());
        assert!(history.append(entry("3-cccccc", "Docker")).is_saved());
        let ids: Vec<String> = history.load().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["1-aaaaaa", "2-bbbbbb", "3-cccccc"]);
    }

    #[test]
    fn test_save_of_loaded_history_is_byte_identical() {
        let (backing, history) = memory_history();
        history.append(entry("1-aaaaaa", "React and SQL"));
        history.append(entry("2-bbbbbb", ""));
        let before = backing.get(HISTORY_KEY).unwrap().unwrap();

        assert!(history.save(&history.load()).is_saved());
        let after = backing.get(HISTORY_KEY).unwrap().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_select_by_id_or_latest() {
        let (_, history) = memory_history();
        assert!(history.select(None).is_none());

        history.append(entry("1-aaaaaa", "React"));
        history.append(entry("2-bbbbbb", "SQL"));
        assert_eq!(history.select(Some("1-aaaaaa")).unwrap().id, "1-aaaaaa");
        assert_eq!(history.select(None).unwrap().id, "2-bbbbbb");
        assert_eq!(history.select(Some("missing")).unwrap().id, "2-bbbbbb");
    }

    #[test]
    fn test_open_backfills_legacy_entry_and_persists() {
        let (backing, history) = memory_history();
        backing
            .set(
                HISTORY_KEY,
                r#"[{"id":"9-legacy","jdText":"React","readinessScore":57,
                    "extractedSkills":{"categories":{"web":["React"]},"categoriesPresent":["web"],"hasAny":true}}]"#,
            )
            .unwrap();

        let (opened, outcome) = history.open(None).unwrap();
        assert!(outcome.is_saved());
        assert_eq!(opened.base_readiness_score, Some(57));
        assert_eq!(opened.confidence_of("React"), Confidence::Practice);
        assert_eq!(opened.readiness_score, 55);

        let stored = history.find("9-legacy").unwrap();
        assert_eq!(stored, opened);

        // Reopening must not drift the score downwards again.
        let (reopened, _) = history.open(Some("9-legacy")).unwrap();
        assert_eq!(reopened.readiness_score, 55);
        assert_eq!(reopened.base_readiness_score, Some(57));
    }

    #[test]
    fn test_set_skill_confidence_persists_by_id() {
        let (_, history) = memory_history();
        history.append(entry("1-aaaaaa", "React and SQL"));
        history.append(entry("2-bbbbbb", "Docker"));

        let (updated, outcome) = history
            .set_skill_confidence("1-aaaaaa", "React", Confidence::Know)
            .unwrap();
        assert!(outcome.is_saved());
        let base = updated.base_readiness_score.unwrap();
        assert_eq!(updated.readiness_score, base);

        let stored = history.find("1-aaaaaa").unwrap();
        assert_eq!(stored.confidence_of("React"), Confidence::Know);
        assert_eq!(stored.readiness_score, base);
        // other entries untouched
        assert_eq!(history.find("2-bbbbbb").unwrap(), entry("2-bbbbbb", "Docker"));
    }

    #[test]
    fn test_set_skill_confidence_without_entry_is_noop() {
        let (backing, history) = memory_history();
        assert!(history
            .set_skill_confidence("missing", "React", Confidence::Know)
            .is_none());
        assert!(backing.get(HISTORY_KEY).unwrap().is_none());

        history.append(entry("1-aaaaaa", "React"));
        assert!(history
            .set_skill_confidence("1-aaaaaa", "Kubernetes", Confidence::Know)
            .is_none());
    }

    #[test]
    fn test_replace_unknown_id_fails_without_writing() {
        let (backing, history) = memory_history();
        history.append(entry("1-aaaaaa", "React"));
        let before = backing.get(HISTORY_KEY).unwrap();
        let outcome = history.replace(&entry("7-ghost0", "SQL"));
        assert!(!outcome.is_saved());
        assert_eq!(backing.get(HISTORY_KEY).unwrap(), before);
    }

    #[test]
    fn test_last_writer_wins_between_two_handles() {
        let backing = Arc::new(MemoryStore::new());
        let tab_a = HistoryStore::new(backing.clone());
        let tab_b = HistoryStore::new(backing.clone());

        let stale = tab_a.load();
        tab_b.append(entry("1-aaaaaa", "React"));
        tab_a.save(&stale);

        assert!(tab_b.load().is_empty());
    }
}
