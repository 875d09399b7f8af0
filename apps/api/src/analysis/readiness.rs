//! Live readiness: adjusts the base score by the user's per-skill confidence.
//!
//! The displayed score is always recomputed from the base score, never from the
//! previously displayed one, so repeated toggles cannot drift.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::analysis::extractor::ExtractionResult;
use crate::models::history::{HistoryEntry, SkillConfidenceMap};

/// Points added per known skill and removed per skill that needs practice.
const CONFIDENCE_DELTA: i64 = 2;
const WEAK_SKILL_LIMIT: usize = 3;

/// Self-assessment for one extracted skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Know,
    #[default]
    Practice,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Know => "know",
            Confidence::Practice => "practice",
        }
    }

    /// Label used in exported reports.
    pub fn report_label(&self) -> &'static str {
        match self {
            Confidence::Know => "I know this",
            Confidence::Practice => "Need practice",
        }
    }
}

// Anything other than "know" reads as practice, so a bad value never fails a history load.
impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            Some("know") => Confidence::Know,
            _ => Confidence::Practice,
        })
    }
}

/// Base score plus 2 per known skill, minus 2 per other skill, clamped to 0..=100.
/// Skills missing from the map count as practice.
pub fn compute_live_readiness<S: AsRef<str>>(
    base: u32,
    skills: &[S],
    confidence_map: &SkillConfidenceMap,
) -> u32 {
    let adjusted = skills.iter().fold(i64::from(base), |score, skill| {
        match confidence_map.get(skill.as_ref()) {
            Some(Confidence::Know) => score + CONFIDENCE_DELTA,
            _ => score - CONFIDENCE_DELTA,
        }
    });
    adjusted.clamp(0, 100) as u32
}

/// Matched skills, category-then-skill order, without duplicates.
pub fn extracted_skill_list(extracted: &ExtractionResult) -> Vec<String> {
    let mut seen = HashSet::new();
    extracted
        .categories
        .flatten()
        .filter(|skill| seen.insert(*skill))
        .map(str::to_string)
        .collect()
}

/// Copies `existing` and gives every skill without an entry the default (practice).
pub fn build_confidence_map(skills: &[String], existing: &SkillConfidenceMap) -> SkillConfidenceMap {
    let mut map = existing.clone();
    for skill in skills {
        map.entry(skill.clone()).or_default();
    }
    map
}

impl HistoryEntry {
    /// Base score, falling back to the displayed score for entries saved before it existed.
    pub fn base_score(&self) -> u32 {
        self.base_readiness_score.unwrap_or(self.readiness_score)
    }

    pub fn skills(&self) -> Vec<String> {
        extracted_skill_list(&self.extracted_skills)
    }

    pub fn confidence_of(&self, skill: &str) -> Confidence {
        self.skill_confidence_map
            .get(skill)
            .copied()
            .unwrap_or_default()
    }

    /// Backfills the base score, materializes the confidence map and recomputes the
    /// displayed score. Idempotent.
    pub fn normalize(&mut self) {
        let base = self.base_score();
        let skills = self.skills();
        self.base_readiness_score = Some(base);
        self.skill_confidence_map = build_confidence_map(&skills, &self.skill_confidence_map);
        self.readiness_score = compute_live_readiness(base, &skills, &self.skill_confidence_map);
    }

    /// Records confidence for an extracted skill and recomputes the displayed score
    /// from the base score. Returns false, leaving the entry untouched, when the
    /// skill was not extracted for this entry.
    pub fn set_skill_confidence(&mut self, skill: &str, value: Confidence) -> bool {
        let skills = self.skills();
        if !skills.iter().any(|s| s == skill) {
            return false;
        }
        let base = self.base_score();
        self.base_readiness_score = Some(base);
        self.skill_confidence_map.insert(skill.to_string(), value);
        self.readiness_score = compute_live_readiness(base, &skills, &self.skill_confidence_map);
        true
    }

    /// Up to three extracted skills not marked as known.
    pub fn weak_skills(&self) -> Vec<String> {
        self.skills()
            .into_iter()
            .filter(|skill| self.confidence_of(skill) != Confidence::Know)
            .take(WEAK_SKILL_LIMIT)
            .collect()
    }
}
