//! Quiz endpoints for the selected questionnaire.

use axum::{extract::State, Json};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::quiz::{ensure_questionnaire_id, grade, QuizResult, QuizSheet};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    #[serde(default)]
    pub answers: Vec<Vec<String>>,
}

/// GET /api/quiz - The selected questionnaire without its answers.
pub async fn get_quiz(State(state): State<AppState>) -> ApiResult<QuizSheet> {
    let selected = state.repo.selected_questionnaire().await?;
    let id = ensure_questionnaire_id(selected.as_deref())?;
    let questionnaire = state.backend.fetch_questionnaire_full(id).await?;
    success(QuizSheet::from_questionnaire(&questionnaire)?)
}

/// POST /api/quiz/grade - Score the submitted selections.
pub async fn grade_quiz(
    State(state): State<AppState>,
    Json(request): Json<GradeRequest>,
) -> ApiResult<QuizResult> {
    let selected = state.repo.selected_questionnaire().await?;
    let id = ensure_questionnaire_id(selected.as_deref())?;
    let questionnaire = state.backend.fetch_questionnaire_full(id).await?;

    let result = grade(&questionnaire, &request.answers)?;
    tracing::info!("Quiz {} graded: {}", id, result.summary());
    success(result)
}
