//! Axum route handlers for catalog read projections.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::assessment::AssessmentRow;
use crate::state::AppState;
use crate::store;

#[derive(Debug, Serialize)]
pub struct AssessmentListResponse {
    pub assessments: Vec<AssessmentRow>,
}

/// GET /api/v1/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
) -> Result<Json<AssessmentListResponse>, AppError> {
    let assessments = store::list_assessments(&state.db)
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(AssessmentListResponse { assessments }))
}

/// GET /api/v1/assessments/:id
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssessmentRow>, AppError> {
    let assessment = store::assessment_by_id(&state.db, id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("Assessment {id} not found")))?;
    Ok(Json(assessment))
}
