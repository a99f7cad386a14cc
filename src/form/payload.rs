//! Submission-boundary validation of the wire payload.

use serde::{Deserialize, Serialize};

use super::rules::{check, Facts};
use crate::models::{QuestionPayload, QuestionnairePayload, RecordKind, Status};

/// Flattened record as sent to the backend: entries become the parallel
/// `responses` / `corrects` lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub kind: RecordKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub uses: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
    #[serde(default)]
    pub corrects: Vec<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub remark: Option<String>,
}

impl SubmissionPayload {
    pub(crate) fn facts(&self) -> Facts {
        Facts {
            kind: self.kind,
            status: self.status,
            title_filled: !self.title.trim().is_empty(),
            subjects_filled: !self.subjects.is_empty(),
            uses_filled: !self.uses.is_empty(),
            has_entries: self.responses.iter().any(|r| !r.trim().is_empty()),
            has_correct: !self.corrects.is_empty(),
            corrects_in_entries: self
                .corrects
                .iter()
                .all(|c| self.responses.contains(c)),
        }
    }

    pub fn into_question_payload(self) -> QuestionPayload {
        QuestionPayload {
            question: self.title.trim().to_string(),
            subject: self.subjects,
            uses: self.uses,
            remark: self.remark,
            status: self.status,
            responses: self.responses,
            corrects: self.corrects,
        }
    }

    pub fn into_questionnaire_payload(self) -> QuestionnairePayload {
        QuestionnairePayload {
            title: self.title.trim().to_string(),
            subject: self.subjects,
            uses: self.uses,
            questions: self.responses,
            remark: self.remark,
            status: self.status,
        }
    }
}

/// Check a payload right before it is sent, independently of the live form.
///
/// Returns every violated rule's message; an empty list means valid.
pub fn validate_submission_payload(payload: &SubmissionPayload) -> Vec<String> {
    check(&payload.facts())
        .into_iter()
        .map(|e| e.message)
        .collect()
}
