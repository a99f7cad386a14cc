//! Form evaluation endpoints.
//!
//! Browser scripts post their form state and render the returned view, so
//! the rules live in one place.

use axum::Json;
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::form::{validate_submission_payload, FormState, FormView, SubmissionPayload};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

/// POST /api/forms/evaluate - Recompute statuses, validity and locks.
pub async fn evaluate_form(Json(mut state): Json<FormState>) -> ApiResult<EvaluatedForm> {
    let view = state.recompute();
    success(EvaluatedForm { state, view })
}

/// The form after any forced downgrade, with its view.
#[derive(Debug, Serialize)]
pub struct EvaluatedForm {
    pub state: FormState,
    pub view: FormView,
}

/// POST /api/forms/validate - Check a payload right before submission.
pub async fn validate_form(Json(payload): Json<SubmissionPayload>) -> ApiResult<ValidationReport> {
    let errors = validate_submission_payload(&payload);
    if !errors.is_empty() {
        tracing::debug!(count = errors.len(), "Payload rejected");
    }
    success(ValidationReport { errors })
}
