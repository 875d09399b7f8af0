//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::catalog::{skill_categories, SkillCategory};
use crate::analysis::export::{render, report_file_name, ExportKind};
use crate::analysis::generator::{analyze, AnalyzeRequest};
use crate::analysis::readiness::Confidence;
use crate::errors::AppError;
use crate::models::history::HistoryEntry;
use crate::state::{run_blocking, AppState};
use crate::storage::SaveOutcome;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsResponse {
    pub entry: HistoryEntry,
    /// First three extracted skills not yet marked as known.
    pub weak_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConfidenceRequest {
    pub skill: String,
    pub confidence: String,
}

fn parse_confidence(raw: &str) -> Result<Confidence, AppError> {
    [Confidence::Know, Confidence::Practice]
        .into_iter()
        .find(|confidence| confidence.as_str() == raw)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "confidence must be {:?} or {:?}, got {raw:?}",
                Confidence::Know.as_str(),
                Confidence::Practice.as_str()
            ))
        })
}

fn warn_if_unsaved(id: &str, outcome: &SaveOutcome) {
    if let SaveOutcome::Failed(reason) = outcome {
        warn!("Analysis {id} was not persisted: {reason}");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/catalog
pub async fn handle_catalog() -> Json<Vec<SkillCategory>> {
    Json(skill_categories())
}

/// POST /api/v1/analyses
///
/// Runs the analysis pipeline and appends the entry to history. A failed write is
/// logged; the generated entry is still returned.
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<(StatusCode, Json<HistoryEntry>), AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jdText cannot be empty".to_string()));
    }

    let entry = analyze(&request);
    info!(
        "Analysis {} created: base score {}, {} skills",
        entry.id,
        entry.base_score(),
        entry.skill_confidence_map.len()
    );

    let history = state.history.clone();
    let stored = entry.clone();
    let outcome = run_blocking(move || history.append(stored)).await?;
    warn_if_unsaved(&entry.id, &outcome);

    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/analyses
///
/// Full history, oldest first, exactly as stored.
pub async fn handle_list_analyses(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let history = state.history.clone();
    let entries = run_blocking(move || history.load()).await?;
    Ok(Json(entries))
}

/// GET /api/v1/results?id=<id>
///
/// Opens an entry for display: the requested one, or the latest when no (or an
/// unknown) id is given. The entry is normalized and written back.
pub async fn handle_results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<ResultsResponse>, AppError> {
    let history = state.history.clone();
    let (entry, outcome) = run_blocking(move || history.open(query.id.as_deref()))
        .await?
        .ok_or_else(|| AppError::NotFound("No saved analysis found".to_string()))?;
    warn_if_unsaved(&entry.id, &outcome);

    Ok(Json(ResultsResponse {
        weak_skills: entry.weak_skills(),
        entry,
    }))
}

/// PUT /api/v1/analyses/:id/confidence
pub async fn handle_set_confidence(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ConfidenceRequest>,
) -> Result<Json<HistoryEntry>, AppError> {
    let value = parse_confidence(&request.confidence)?;

    let history = state.history.clone();
    let (lookup_id, skill) = (id.clone(), request.skill.clone());
    let (updated, exists) = run_blocking(move || {
        let updated = history.set_skill_confidence(&lookup_id, &skill, value);
        let exists = updated.is_some() || history.find(&lookup_id).is_some();
        (updated, exists)
    })
    .await?;

    match updated {
        Some((entry, outcome)) => {
            warn_if_unsaved(&entry.id, &outcome);
            Ok(Json(entry))
        }
        None if !exists => Err(AppError::NotFound(format!("Analysis {id} not found"))),
        None => Err(AppError::Validation(format!(
            "Skill {} was not extracted for analysis {id}",
            request.skill
        ))),
    }
}

/// GET /api/v1/analyses/:id/export/:kind
///
/// Plain-text export. The full report is served as a download.
pub async fn handle_export(
    State(state): State<AppState>,
    Path((id, kind)): Path<(String, ExportKind)>,
) -> Result<Response, AppError> {
    let history = state.history.clone();
    let lookup_id = id.clone();
    let entry = run_blocking(move || history.find(&lookup_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;

    let body = render(&entry, kind);
    let content_type = [(header::CONTENT_TYPE, "text/plain; charset=utf-8")];

    if kind == ExportKind::Report {
        let disposition = format!("attachment; filename=\"{}\"", report_file_name(&entry));
        return Ok((
            content_type,
            [(header::CONTENT_DISPOSITION, disposition)],
            body,
        )
            .into_response());
    }
    Ok((content_type, body).into_response())
}
