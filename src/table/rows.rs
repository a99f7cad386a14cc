//! Table rows and per-row actions.

use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;

use crate::models::{Question, Questionnaire, Status};

/// Titles longer than this are cut and suffixed with `...`.
pub const TITLE_MAX_CHARS: usize = 50;

const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Last four characters of a record id.
pub fn short_id(id: &str) -> String {
    let count = id.chars().count();
    id.chars().skip(count.saturating_sub(4)).collect()
}

pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Parse a backend timestamp: RFC 3339, or a naive ISO date-time.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Latest of the creation and edition dates, as `dd/mm/yyyy HH:MM`.
/// Empty when neither parses.
pub fn last_modified(created_at: Option<&str>, edited_at: Option<&str>) -> String {
    let created = created_at.and_then(parse_timestamp);
    let edited = edited_at.and_then(parse_timestamp);
    created
        .max(edited)
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    View,
    Edit,
    AddToQuiz,
    Select,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RowAction {
    pub kind: ActionKind,
    pub enabled: bool,
}

/// Buttons of a table row, in display order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RowActions(Vec<RowAction>);

impl RowActions {
    /// View always; edit for the creator; add-to-quiz for active questions
    /// while a questionnaire is selected.
    pub fn for_question(
        question: &Question,
        user_id: Option<i64>,
        selected_questionnaire: Option<&str>,
    ) -> Self {
        let can_add = question.status == Status::Active
            && selected_questionnaire.is_some_and(is_valid_questionnaire_id);
        RowActions(vec![
            RowAction {
                kind: ActionKind::View,
                enabled: true,
            },
            RowAction {
                kind: ActionKind::Edit,
                enabled: is_creator(question.created_by, user_id),
            },
            RowAction {
                kind: ActionKind::AddToQuiz,
                enabled: can_add,
            },
        ])
    }

    /// View always; edit for the creator; select unless archived.
    pub fn for_questionnaire<Q>(questionnaire: &Questionnaire<Q>, user_id: Option<i64>) -> Self {
        RowActions(vec![
            RowAction {
                kind: ActionKind::View,
                enabled: true,
            },
            RowAction {
                kind: ActionKind::Edit,
                enabled: is_creator(questionnaire.created_by, user_id),
            },
            RowAction {
                kind: ActionKind::Select,
                enabled: questionnaire.status != Status::Archive,
            },
        ])
    }

    pub fn is_enabled(&self, kind: ActionKind) -> bool {
        self.0.iter().any(|a| a.kind == kind && a.enabled)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RowAction> {
        self.0.iter()
    }
}

fn is_creator(created_by: Option<i64>, user_id: Option<i64>) -> bool {
    matches!((created_by, user_id), (Some(a), Some(b)) if a == b)
}

/// Questionnaire ids coming from the page or storage may be placeholders.
pub fn is_valid_questionnaire_id(id: &str) -> bool {
    let id = id.trim();
    !id.is_empty() && id != "None" && id != "null"
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRow {
    pub id: String,
    pub short_id: String,
    pub title: String,
    pub subjects: Vec<String>,
    pub uses: Vec<String>,
    pub status: Status,
    pub creator: String,
    pub last_modified: String,
    pub actions: RowActions,
}

impl QuestionRow {
    pub fn new(question: &Question, creator: String, actions: RowActions) -> Self {
        let id = question.id.clone().unwrap_or_default();
        Self {
            short_id: short_id(&id),
            id,
            title: truncate_text(&question.question, TITLE_MAX_CHARS),
            subjects: question.subject.clone(),
            uses: question.uses.clone(),
            status: question.status,
            creator,
            last_modified: last_modified(
                question.created_at.as_deref(),
                question.edited_at.as_deref(),
            ),
            actions,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireRow {
    pub id: String,
    pub short_id: String,
    pub title: String,
    pub subjects: Vec<String>,
    pub uses: Vec<String>,
    pub status: Status,
    pub question_count: usize,
    pub creator: String,
    pub last_modified: String,
    pub actions: RowActions,
}

impl QuestionnaireRow {
    pub fn new<Q>(questionnaire: &Questionnaire<Q>, creator: String, actions: RowActions) -> Self {
        let id = questionnaire.id.clone().unwrap_or_default();
        Self {
            short_id: short_id(&id),
            id,
            title: truncate_text(&questionnaire.title, TITLE_MAX_CHARS),
            subjects: questionnaire.subject.clone(),
            uses: questionnaire.uses.clone(),
            status: questionnaire.status,
            question_count: questionnaire.questions.len(),
            creator,
            last_modified: last_modified(
                questionnaire.created_at.as_deref(),
                questionnaire.edited_at.as_deref(),
            ),
            actions,
        }
    }
}
