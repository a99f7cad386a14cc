//! Live validity of the form: drives the submit button.

use serde::{Deserialize, Serialize};

use super::rules::{check, FieldError};
use super::FormState;

/// Result of [`compute_validity`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Validity {
    pub is_valid: bool,
    pub reasons: Vec<FieldError>,
}

/// Report whether the record can be submitted in its current status.
///
/// Drafts need a title, subjects, uses and one filled entry; `active` and
/// `archive` questions additionally need a correct entry. Never mutates.
pub fn compute_validity(state: &FormState) -> Validity {
    let reasons = check(&state.facts());
    Validity {
        is_valid: reasons.is_empty(),
        reasons,
    }
}
