use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;
use crate::state::{run_blocking, AppState};
use crate::storage::practice::PracticeProgress;
use crate::storage::SaveOutcome;

#[derive(Debug, Deserialize)]
pub struct PracticeUpdate {
    pub done: bool,
}

/// GET /api/v1/practice
pub async fn handle_get_practice(
    State(state): State<AppState>,
) -> Result<Json<PracticeProgress>, AppError> {
    let practice = state.practice.clone();
    Ok(Json(run_blocking(move || practice.load()).await?))
}

/// PUT /api/v1/practice/:index
///
/// Returns the progress including this update, whether or not it was persisted.
pub async fn handle_set_practice(
    State(state): State<AppState>,
    Path(index): Path<u32>,
    Json(update): Json<PracticeUpdate>,
) -> Result<Json<PracticeProgress>, AppError> {
    let practice = state.practice.clone();
    let (progress, outcome) = run_blocking(move || practice.set(index, update.done)).await?;
    if let SaveOutcome::Failed(reason) = &outcome {
        warn!("Practice item {index} was not persisted: {reason}");
    }
    Ok(Json(progress))
}
