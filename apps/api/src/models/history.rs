use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analysis::checklist::ChecklistRound;
use crate::analysis::extractor::ExtractionResult;
use crate::analysis::plan::PlanDay;
use crate::analysis::readiness::Confidence;
use crate::models::lenient;

/// Skill → confidence, in the order skills were first recorded.
pub type SkillConfidenceMap = IndexMap<String, Confidence>;

/// One persisted analysis session.
///
/// Every field is optional on read and a wrong-typed field decodes to its default,
/// so entries written by older clients still load. Loading and re-saving an entry in
/// this field order reproduces it byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryEntry {
    /// `<ms-epoch>-<6 base36 chars>`
    #[serde(deserialize_with = "lenient::or_default")]
    pub id: String,
    #[serde(with = "lenient::iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub company: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub role: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub jd_text: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub extracted_skills: ExtractionResult,
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub checklist: Vec<ChecklistRound>,
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub plan: Vec<PlanDay>,
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub questions: Vec<String>,
    /// Displayed score: base adjusted by the confidence map.
    #[serde(deserialize_with = "lenient::score")]
    pub readiness_score: u32,
    /// Score at analysis time. Written once; backfilled from `readiness_score` when missing.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_score"
    )]
    pub base_readiness_score: Option<u32>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub skill_confidence_map: SkillConfidenceMap,
    /// Fields this version does not model. Carried through so a save keeps them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_entry_without_optional_fields_loads() {
        let json = r#"{
            "id": "1700000000000-abc123",
            "createdAt": "2023-11-14T22:13:20.000Z",
            "company": "Acme",
            "role": "SDE",
            "jdText": "React",
            "readinessScore": 55
        }"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "1700000000000-abc123");
        assert_eq!(entry.readiness_score, 55);
        assert_eq!(entry.base_readiness_score, None);
        assert!(entry.skill_confidence_map.is_empty());
        assert!(entry.extracted_skills.categories.web.is_empty());
        assert_eq!(entry.created_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_absent_base_score_is_not_serialized() {
        let entry = HistoryEntry::default();
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("baseReadinessScore").is_none());
        assert!(json.get("skillConfidenceMap").is_some());
        assert!(json.get("jdText").is_some());
    }

    #[test]
    fn test_wrong_typed_fields_default_instead_of_failing() {
        let json = r#"{
            "id": "2-bad000",
            "createdAt": "sometime",
            "extractedSkills": null,
            "checklist": null,
            "plan": "none",
            "questions": ["Q1?", 7],
            "readinessScore": 57.5,
            "baseReadinessScore": "n/a",
            "skillConfidenceMap": []
        }"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "2-bad000");
        assert_eq!(entry.created_at, DateTime::<Utc>::default());
        assert_eq!(entry.extracted_skills, ExtractionResult::default());
        assert!(entry.checklist.is_empty());
        assert!(entry.plan.is_empty());
        assert_eq!(entry.questions, vec!["Q1?"]);
        assert_eq!(entry.readiness_score, 58);
        assert_eq!(entry.base_readiness_score, None);
        assert!(entry.skill_confidence_map.is_empty());
    }

    #[test]
    fn test_unknown_fields_survive_a_round_trip() {
        let json = r#"{"id":"1-abc123","notes":{"z":1,"a":2}}"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.extra["notes"], serde_json::json!({"z": 1, "a": 2}));
        let written = serde_json::to_string(&entry).unwrap();
        assert!(written.ends_with(r#""notes":{"z":1,"a":2}}"#), "{written}");
    }

    #[test]
    fn test_confidence_map_keeps_insertion_order() {
        let json = r#"{"skillConfidenceMap":{"SQL":"know","React":"practice"}}"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = entry.skill_confidence_map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["SQL", "React"]);
        let written = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            written["skillConfidenceMap"].to_string(),
            r#"{"SQL":"know","React":"practice"}"#
        );
    }
}
