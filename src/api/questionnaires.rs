//! Questionnaire table and selection endpoints.

use axum::extract::{Path, Query, State};
use serde::Serialize;

use super::{success, ApiResult, TableQuery};
use crate::backend::RecordApi;
use crate::errors::AppError;
use crate::models::Status;
use crate::quiz::ensure_questionnaire_id;
use crate::table::{QuestionnaireRow, RowActions};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub questionnaire_id: String,
}

/// GET /api/questionnaires/table - Filtered questionnaire rows.
pub async fn questionnaire_table(
    State(state): State<AppState>,
    Query(query): Query<TableQuery>,
) -> ApiResult<Vec<QuestionnaireRow>> {
    let questionnaires = state.backend.list_questionnaires().await?;
    let filter = query.filter();

    let mut rows = Vec::new();
    for questionnaire in filter.apply(&questionnaires) {
        let creator = state.user_names.name_of(questionnaire.created_by).await;
        let actions = RowActions::for_questionnaire(questionnaire, state.config.user_id);
        rows.push(QuestionnaireRow::new(questionnaire, creator, actions));
    }

    success(rows)
}

/// POST /api/questionnaire/{id}/select - Use a questionnaire for the quiz.
pub async fn select_questionnaire(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Selection> {
    let id = ensure_questionnaire_id(Some(id.as_str()))?;
    let questionnaire = state.backend.fetch_questionnaire(id).await?;
    if questionnaire.status == Status::Archive {
        return Err(AppError::invalid(
            "An archived questionnaire cannot be selected.",
        ));
    }

    state.repo.select_questionnaire(id).await?;
    tracing::info!("Questionnaire {} selected", id);

    success(Selection {
        questionnaire_id: id.to_string(),
    })
}
