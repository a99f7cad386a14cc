//! Question results table.

use axum::extract::{Query, State};
use serde::Deserialize;

use super::{split_list, success, ApiResult};
use crate::table::{QuestionRow, RowActions, TagFilter};
use crate::AppState;

/// Comma-separated active tags. An absent list does not filter.
#[derive(Debug, Default, Deserialize)]
pub struct TableQuery {
    pub subjects: Option<String>,
    pub uses: Option<String>,
}

impl TableQuery {
    pub fn filter(&self) -> TagFilter {
        TagFilter::with_active(
            split_list(self.subjects.as_deref()),
            split_list(self.uses.as_deref()),
        )
    }
}

/// GET /api/questions/table - Filtered question rows.
pub async fn question_table(
    State(state): State<AppState>,
    Query(query): Query<TableQuery>,
) -> ApiResult<Vec<QuestionRow>> {
    let questions = state.backend.list_questions().await?;
    let selected = state.repo.selected_questionnaire().await?;
    let filter = query.filter();

    let mut rows = Vec::new();
    for question in filter.apply(&questions) {
        let creator = state.user_names.name_of(question.created_by).await;
        let actions =
            RowActions::for_question(question, state.config.user_id, selected.as_deref());
        rows.push(QuestionRow::new(question, creator, actions));
    }

    tracing::debug!("Question table: {} of {} rows", rows.len(), questions.len());
    success(rows)
}
