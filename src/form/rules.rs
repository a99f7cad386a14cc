//! The single rule table shared by live validity and submission checks.

use serde::{Deserialize, Serialize};

use crate::models::{RecordKind, Status};

/// Form field a validation failure is reported against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Subjects,
    Uses,
    Entries,
    Status,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Subjects => "subjects",
            Field::Uses => "uses",
            Field::Entries => "entries",
            Field::Status => "status",
        }
    }
}

/// One violated rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// What the rules look at, whichever path the record came from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Facts {
    pub kind: RecordKind,
    pub status: Status,
    pub title_filled: bool,
    pub subjects_filled: bool,
    pub uses_filled: bool,
    pub has_entries: bool,
    pub has_correct: bool,
    /// Always true for typed entries; only a hand-built payload can break it.
    pub corrects_in_entries: bool,
}

impl Facts {
    pub fn basics_filled(&self) -> bool {
        self.title_filled && self.subjects_filled && self.uses_filled
    }
}

/// Evaluate every rule and report all failures in field order.
pub(crate) fn check(facts: &Facts) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !facts.title_filled {
        errors.push(FieldError::new(
            Field::Title,
            match facts.kind {
                RecordKind::Question => "Please enter the question text.",
                RecordKind::Questionnaire => "Please enter the questionnaire title.",
            },
        ));
    }
    if !facts.subjects_filled {
        errors.push(FieldError::new(
            Field::Subjects,
            "Please select at least one subject.",
        ));
    }
    if !facts.uses_filled {
        errors.push(FieldError::new(Field::Uses, "Please select at least one use."));
    }
    if !facts.has_entries {
        errors.push(FieldError::new(
            Field::Entries,
            match facts.kind {
                RecordKind::Question => "Please provide at least one response.",
                RecordKind::Questionnaire => "Please add at least one question.",
            },
        ));
    }

    if facts.status.is_gated() && facts.kind.has_correctness() {
        if !facts.has_correct {
            errors.push(FieldError::new(
                Field::Status,
                "A correct response is required for the active or archived status.",
            ));
        } else if !facts.corrects_in_entries {
            errors.push(FieldError::new(
                Field::Status,
                "Correct responses must be among the proposed responses.",
            ));
        }
    }

    errors
}
