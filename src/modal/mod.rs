//! Modal controller for the question and questionnaire editors.
//!
//! A modal is `Closed` or `Open` in one [`Mode`](crate::models::Mode). Every
//! mutation goes through the controller, which recomputes the form view
//! before returning. Fetches are tied to a [`Ticket`]; a result arriving
//! after the modal was closed or reopened is dropped.

mod controller;

pub use controller::*;

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Mode, Status};

/// Rows appended below a record's entries when it is opened for editing.
pub const SPARE_ROWS: usize = 2;

/// Identifies one in-flight fetch for a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(Uuid);

impl Ticket {
    pub(crate) fn issue() -> Self {
        Ticket(Uuid::new_v4())
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a modal instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    /// Waiting for the record to display.
    Loading { mode: Mode, id: String, ticket: Ticket },
    Open { mode: Mode, id: Option<String> },
}

impl ModalState {
    pub fn mode(&self) -> Option<Mode> {
        match self {
            ModalState::Closed => None,
            ModalState::Loading { mode, .. } | ModalState::Open { mode, .. } => Some(*mode),
        }
    }

    pub fn record_id(&self) -> Option<&str> {
        match self {
            ModalState::Closed => None,
            ModalState::Loading { id, .. } => Some(id),
            ModalState::Open { id, .. } => id.as_deref(),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open { .. })
    }
}

/// Successful submission.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub id: String,
    pub status: Status,
    pub created: bool,
    pub message: String,
}
