//! Analysis pipeline: JD text in, fully generated history entry out.
//!
//! Flow: extract_skills → compute_readiness_score → build_checklist / build_plan /
//!       build_questions → stamp id + timestamp → default confidence map.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use crate::analysis::checklist::build_checklist;
use crate::analysis::extractor::extract_skills;
use crate::analysis::plan::build_plan;
use crate::analysis::questions::build_questions;
use crate::analysis::scoring::{compute_readiness_score, ScoreInputs};
use crate::models::history::HistoryEntry;

const ID_SUFFIX_LEN: usize = 6;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Input of one analysis run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub jd_text: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
}

/// `<ms-epoch>-<6 random base36 chars>`. Unique enough for a single user on one device.
pub fn generate_entry_id(created_at: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{suffix}", created_at.timestamp_millis())
}

/// Builds a complete entry with the given identity. Deterministic for identical inputs.
pub fn build_entry(request: &AnalyzeRequest, id: String, created_at: DateTime<Utc>) -> HistoryEntry {
    let company = request.company.trim().to_string();
    let role = request.role.trim().to_string();

    let extracted = extract_skills(&request.jd_text);
    let base_score = compute_readiness_score(&ScoreInputs {
        categories_present: &extracted.categories_present,
        company: &company,
        role: &role,
        jd_text: &request.jd_text,
    });

    let mut entry = HistoryEntry {
        id,
        created_at,
        company,
        role,
        jd_text: request.jd_text.clone(),
        checklist: build_checklist(&extracted),
        plan: build_plan(&extracted),
        questions: build_questions(&extracted),
        extracted_skills: extracted,
        readiness_score: base_score,
        base_readiness_score: Some(base_score),
        skill_confidence_map: Default::default(),
        extra: Default::default(),
    };
    entry.normalize();

    debug!(
        "Built entry {} with {} categories, base score {}",
        entry.id,
        entry.extracted_skills.categories_present.len(),
        base_score
    );
    entry
}

/// Runs the pipeline with a fresh id and the current time (millisecond precision).
pub fn analyze(request: &AnalyzeRequest) -> HistoryEntry {
    let now = Utc::now();
    let created_at = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);
    let id = generate_entry_id(created_at);
    build_entry(request, id, created_at)
}
