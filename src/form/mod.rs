//! Form state machine shared by the question and questionnaire editors.
//!
//! The typed [`FormState`] is the only source of truth. Renderers read the
//! [`FormView`] produced by [`FormState::recompute`]; they never feed
//! rendered values back.

mod entries;
mod locks;
mod payload;
mod rules;
mod select;
mod statuses;
mod validity;

pub use entries::*;
pub use locks::*;
pub use payload::*;
pub use rules::{Field, FieldError};
pub use select::*;
pub use statuses::*;
pub use validity::*;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{Mode, Question, QuestionnaireShort, RecordKind, Status};
use rules::Facts;

/// Rows a fresh form starts with.
pub const BLANK_ROWS: usize = 2;

/// Editable state of a question or questionnaire form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormState {
    #[serde(default)]
    pub kind: RecordKind,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subjects: BTreeSet<String>,
    #[serde(default)]
    pub uses: BTreeSet<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub entries: EntryList,
    #[serde(default)]
    pub remark: Option<String>,
}

/// Everything a renderer needs after a recomputation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub status: Status,
    pub validity: Validity,
    pub statuses: StatusOptions,
    pub locks: FieldLocks,
    pub is_submittable: bool,
}

impl FormState {
    /// Blank form in create mode: two empty rows, draft status.
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            mode: Mode::Create,
            title: String::new(),
            subjects: BTreeSet::new(),
            uses: BTreeSet::new(),
            status: Status::Draft,
            entries: EntryList::blank(BLANK_ROWS),
            remark: None,
        }
    }

    pub fn from_question(question: &Question, mode: Mode) -> Self {
        Self {
            kind: RecordKind::Question,
            mode,
            title: question.question.trim().to_string(),
            subjects: question.subject.iter().cloned().collect(),
            uses: question.uses.iter().cloned().collect(),
            status: question.status,
            entries: EntryList::from_parallel_lists(&question.responses, &question.corrects),
            remark: question.remark.clone(),
        }
    }

    pub fn from_questionnaire(questionnaire: &QuestionnaireShort, mode: Mode) -> Self {
        Self {
            kind: RecordKind::Questionnaire,
            mode,
            title: questionnaire.title.trim().to_string(),
            subjects: questionnaire.subject.iter().cloned().collect(),
            uses: questionnaire.uses.iter().cloned().collect(),
            status: questionnaire.status,
            entries: EntryList::from_texts(questionnaire.questions.iter().cloned()),
            remark: questionnaire.remark.clone(),
        }
    }

    pub(crate) fn facts(&self) -> Facts {
        Facts {
            kind: self.kind,
            status: self.status,
            title_filled: !self.title.trim().is_empty(),
            subjects_filled: !self.subjects.is_empty(),
            uses_filled: !self.uses.is_empty(),
            has_entries: self.entries.has_filled(),
            has_correct: self.entries.has_correct(),
            corrects_in_entries: true,
        }
    }

    /// Gate statuses, apply any forced downgrade, then evaluate validity.
    /// Every mutation of the form must be followed by a call to this.
    pub fn recompute(&mut self) -> FormView {
        let statuses = compute_allowed_statuses(self);
        // A read-only form shows the record as fetched.
        let forced = statuses.forced_status.filter(|_| !self.mode.is_readonly());
        if let Some(forced) = forced {
            tracing::debug!(
                kind = self.kind.as_str(),
                from = self.status.as_str(),
                to = forced.as_str(),
                "Status downgraded"
            );
            self.status = forced;
        }

        let validity = compute_validity(self);
        let locks = compute_field_locks(self.mode);
        tracing::trace!(valid = validity.is_valid, "Form recomputed");

        FormView {
            status: self.status,
            is_submittable: validity.is_valid && !locks.readonly,
            validity,
            statuses,
            locks,
        }
    }

    /// Flatten into the wire shape. Remarks are trimmed, blank ones dropped.
    pub fn to_payload(&self) -> SubmissionPayload {
        let (responses, corrects) = match self.kind {
            RecordKind::Question => self.entries.to_parallel_lists(),
            RecordKind::Questionnaire => (self.entries.texts(), Vec::new()),
        };

        SubmissionPayload {
            kind: self.kind,
            title: self.title.trim().to_string(),
            subjects: self.subjects.iter().cloned().collect(),
            uses: self.uses.iter().cloned().collect(),
            responses,
            corrects,
            status: self.status,
            remark: self
                .remark
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        }
    }
}
