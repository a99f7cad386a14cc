//! Client side of the question bank REST backend.
//!
//! [`RecordApi`] is the seam the modal controller depends on; [`ApiClient`]
//! implements it over HTTP.

mod client;
mod token;

pub use client::*;
pub use token::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Question, QuestionPayload, QuestionnairePayload, QuestionnaireShort};

/// Known tag values used to populate the subject and use selects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagOptions {
    pub subjects: Vec<String>,
    pub uses: Vec<String>,
}

/// Record operations the editors need from the backend.
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// GET /question/{id}
    async fn fetch_question(&self, id: &str) -> Result<Question, AppError>;

    /// PUT /question, returns the new id
    async fn create_question(&self, payload: &QuestionPayload) -> Result<String, AppError>;

    /// PATCH /question/{id}
    async fn update_question(
        &self,
        id: &str,
        payload: &QuestionPayload,
    ) -> Result<Question, AppError>;

    /// GET /questionnaire/{id}/short
    async fn fetch_questionnaire(&self, id: &str) -> Result<QuestionnaireShort, AppError>;

    /// PUT /questionnaire, returns the new id
    async fn create_questionnaire(
        &self,
        payload: &QuestionnairePayload,
    ) -> Result<String, AppError>;

    /// PATCH /questionnaire/{id}
    async fn update_questionnaire(
        &self,
        id: &str,
        payload: &QuestionnairePayload,
    ) -> Result<QuestionnaireShort, AppError>;

    /// Subject and use lists. Failures degrade to empty lists.
    async fn load_tag_options(&self) -> TagOptions;
}
