//! Which lifecycle statuses may currently be selected.

use serde::{Deserialize, Serialize};

use super::FormState;
use crate::models::{RecordKind, Status};

/// Result of [`compute_allowed_statuses`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusOptions {
    pub active: bool,
    pub archive: bool,
    /// Status the form must be downgraded to, if any.
    pub forced_status: Option<Status>,
}

impl StatusOptions {
    pub fn allows(&self, status: Status) -> bool {
        match status {
            Status::Draft => true,
            Status::Active => self.active,
            Status::Archive => self.archive,
        }
    }
}

/// Gate `active`/`archive` on entry completeness.
///
/// Questions need a filled entry marked correct. Questionnaires need their
/// basic fields and at least one question. A gated status that is no longer
/// allowed yields `forced_status = draft`.
pub fn compute_allowed_statuses(state: &FormState) -> StatusOptions {
    let facts = state.facts();
    let allowed = match state.kind {
        RecordKind::Question => facts.has_correct,
        RecordKind::Questionnaire => facts.basics_filled() && facts.has_entries,
    };

    let options = StatusOptions {
        active: allowed,
        archive: allowed,
        forced_status: None,
    };

    StatusOptions {
        forced_status: (!options.allows(state.status)).then_some(Status::Draft),
        ..options
    }
}
