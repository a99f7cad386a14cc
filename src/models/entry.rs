//! Entry rows of a record: responses of a question, question ids of a
//! questionnaire.

use serde::{Deserialize, Serialize};

/// A single response or question row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub text: String,
    #[serde(default, alias = "is_correct")]
    pub is_correct: bool,
}

impl Entry {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    /// Only entries with non-blank text count toward a record.
    pub fn is_filled(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn counts_as_correct(&self) -> bool {
        self.is_correct && self.is_filled()
    }
}
