//! Quiz view: the selected questionnaire rendered without its answers,
//! and grading of submitted selections.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::QuestionnaireFull;
use crate::table::is_valid_questionnaire_id;

/// Validate a questionnaire id taken from storage or configuration.
pub fn ensure_questionnaire_id(id: Option<&str>) -> Result<&str, AppError> {
    match id.map(str::trim) {
        Some(id) if is_valid_questionnaire_id(id) => Ok(id),
        _ => Err(AppError::NotFound(
            "No questionnaire selected.".to_string(),
        )),
    }
}

/// One question as shown to the quiz taker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizQuestion {
    /// `"{n}. {question}"`, numbered from 1
    pub title: String,
    pub options: Vec<String>,
}

/// A questionnaire stripped of its correct answers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizSheet {
    pub questionnaire_id: Option<String>,
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

impl QuizSheet {
    pub fn from_questionnaire(questionnaire: &QuestionnaireFull) -> Result<Self, AppError> {
        ensure_not_empty(questionnaire)?;
        let questions = questionnaire
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| QuizQuestion {
                title: format!("{}. {}", i + 1, q.question),
                options: q.responses.clone(),
            })
            .collect();

        Ok(Self {
            questionnaire_id: questionnaire.id.clone(),
            title: questionnaire.title.clone(),
            questions,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OptionMark {
    /// A correct response, selected or not
    Correct,
    /// Selected but not correct
    Wrong,
    Neutral,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    pub is_correct: bool,
    pub marks: Vec<OptionMark>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub outcomes: Vec<QuestionOutcome>,
}

impl QuizResult {
    pub fn summary(&self) -> String {
        format!("Score : {} / {}", self.score, self.total)
    }
}

/// Grade selections, one list per question in order. Missing lists count as
/// no selection. A question scores when the selected set equals the correct
/// set exactly.
pub fn grade(
    questionnaire: &QuestionnaireFull,
    answers: &[Vec<String>],
) -> Result<QuizResult, AppError> {
    ensure_not_empty(questionnaire)?;
    if answers.len() > questionnaire.questions.len() {
        return Err(AppError::BadRequest(format!(
            "Expected at most {} answer lists, got {}",
            questionnaire.questions.len(),
            answers.len()
        )));
    }

    let outcomes: Vec<QuestionOutcome> = questionnaire
        .questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let selected: BTreeSet<&str> = answers
                .get(i)
                .map(|a| a.iter().map(String::as_str).collect())
                .unwrap_or_default();
            let corrects: BTreeSet<&str> =
                question.corrects.iter().map(String::as_str).collect();

            let marks = question
                .responses
                .iter()
                .map(|option| {
                    if corrects.contains(option.as_str()) {
                        OptionMark::Correct
                    } else if selected.contains(option.as_str()) {
                        OptionMark::Wrong
                    } else {
                        OptionMark::Neutral
                    }
                })
                .collect();

            QuestionOutcome {
                is_correct: selected == corrects,
                marks,
            }
        })
        .collect();

    let score = outcomes.iter().filter(|o| o.is_correct).count();
    tracing::debug!(score, total = outcomes.len(), "Quiz graded");

    Ok(QuizResult {
        score,
        total: outcomes.len(),
        outcomes,
    })
}

fn ensure_not_empty(questionnaire: &QuestionnaireFull) -> Result<(), AppError> {
    if questionnaire.questions.is_empty() {
        return Err(AppError::invalid(
            "This questionnaire does not contain any question.",
        ));
    }
    Ok(())
}
