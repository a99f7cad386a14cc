//! Lifecycle status, modal mode and record kind.

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a question or questionnaire.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Draft,
    Active,
    Archive,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Active => "active",
            Status::Archive => "archive",
        }
    }

    /// `active` and `archive` are gated on entry completeness.
    pub fn is_gated(&self) -> bool {
        matches!(self, Status::Active | Status::Archive)
    }

    /// Suffix used in the creation success message.
    pub fn creation_phrase(&self) -> &'static str {
        match self {
            Status::Draft => " as draft",
            Status::Active => " and activated",
            Status::Archive => " and archived",
        }
    }
}

/// How a modal was opened.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Create,
    Edit,
    View,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Create => "create",
            Mode::Edit => "edit",
            Mode::View => "view",
        }
    }

    pub fn is_readonly(&self) -> bool {
        matches!(self, Mode::View)
    }

    /// Label of the submit button, `None` when the button is hidden.
    pub fn submit_label(&self) -> Option<&'static str> {
        match self {
            Mode::Create => Some("Save"),
            Mode::Edit => Some("Update"),
            Mode::View => None,
        }
    }
}

/// Which editor a form belongs to.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[default]
    Question,
    Questionnaire,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Question => "question",
            RecordKind::Questionnaire => "questionnaire",
        }
    }

    /// Whether entries carry a correctness flag.
    pub fn has_correctness(&self) -> bool {
        matches!(self, RecordKind::Question)
    }
}
