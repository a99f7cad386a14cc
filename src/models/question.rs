//! Question model matching the backend's question documents.

use serde::{Deserialize, Serialize};

use super::{null_as_default, one_or_many, Status};

/// A question as returned by `GET /question/{id}` and `GET /questions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Question {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub question: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub subject: Vec<String>,
    #[serde(default, rename = "use", deserialize_with = "one_or_many")]
    pub uses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Status,
    #[serde(default)]
    pub responses: Vec<String>,
    #[serde(default)]
    pub corrects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i64>,
}

/// Request body for `PUT /question` and `PATCH /question/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionPayload {
    pub question: String,
    pub subject: Vec<String>,
    #[serde(rename = "use")]
    pub uses: Vec<String>,
    pub remark: Option<String>,
    pub status: Status,
    pub responses: Vec<String>,
    pub corrects: Vec<String>,
}

/// Body of a successful creation (`201 Created`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_accepts_single_string_tags() {
        let question: Question = serde_json::from_value(serde_json::json!({
            "id": "q1",
            "question": "2 + 2 ?",
            "subject": "math",
            "use": ["exam", "training"],
            "status": "active",
            "responses": ["4", "5"],
            "corrects": ["4"]
        }))
        .unwrap();

        assert_eq!(question.subject, vec!["math".to_string()]);
        assert_eq!(question.uses.len(), 2);
        assert_eq!(question.status, Status::Active);
        assert!(question.remark.is_none());
    }

    #[test]
    fn test_question_defaults_missing_fields() {
        let question: Question =
            serde_json::from_value(serde_json::json!({ "question": "Why?", "subject": null }))
                .unwrap();

        assert!(question.subject.is_empty());
        assert!(question.uses.is_empty());
        assert_eq!(question.status, Status::Draft);
    }

    #[test]
    fn test_question_null_status_is_draft() {
        let question: Question = serde_json::from_value(serde_json::json!({
            "id": "q1",
            "question": "2 + 2 ?",
            "status": null
        }))
        .unwrap();

        assert_eq!(question.status, Status::Draft);
    }

    #[test]
    fn test_payload_uses_wire_field_names() {
        let payload = QuestionPayload {
            question: "Q".to_string(),
            subject: vec!["math".to_string()],
            uses: vec!["exam".to_string()],
            remark: None,
            status: Status::Draft,
            responses: vec!["4".to_string()],
            corrects: vec![],
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["use"][0], "exam");
        assert_eq!(value["status"], "draft");
    }
}
