//! Questionnaire model matching the backend's questionnaire documents.

use serde::{Deserialize, Serialize};

use super::{null_as_default, one_or_many, Question, Status};

/// A questionnaire. `Q` is a question id for the `/short` view and a full
/// [`Question`] for the `/full` view.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Questionnaire<Q = String> {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "subjects", deserialize_with = "one_or_many")]
    pub subject: Vec<String>,
    #[serde(default, rename = "use", alias = "uses", deserialize_with = "one_or_many")]
    pub uses: Vec<String>,
    #[serde(default = "Vec::new")]
    pub questions: Vec<Q>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<String>,
}

/// `GET /questionnaire/{id}/short`.
pub type QuestionnaireShort = Questionnaire<String>;

/// `GET /questionnaire/{id}/full`.
pub type QuestionnaireFull = Questionnaire<Question>;

/// Request body for `PUT /questionnaire` and `PATCH /questionnaire/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionnairePayload {
    pub title: String,
    pub subject: Vec<String>,
    #[serde(rename = "use")]
    pub uses: Vec<String>,
    pub questions: Vec<String>,
    pub remark: Option<String>,
    pub status: Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_questionnaire_nests_questions() {
        let full: QuestionnaireFull = serde_json::from_value(serde_json::json!({
            "id": "qr1",
            "title": "Basics",
            "subject": ["math"],
            "use": ["exam"],
            "status": "active",
            "questions": [
                { "id": "q1", "question": "2 + 2 ?", "responses": ["4", "5"], "corrects": ["4"] }
            ]
        }))
        .unwrap();

        assert_eq!(full.questions.len(), 1);
        assert_eq!(full.questions[0].corrects, vec!["4".to_string()]);
    }

    #[test]
    fn test_short_questionnaire_keeps_question_order() {
        let short: QuestionnaireShort = serde_json::from_value(serde_json::json!({
            "title": "Basics",
            "questions": ["q3", "q1", "q2"]
        }))
        .unwrap();

        assert_eq!(short.questions, vec!["q3", "q1", "q2"]);
        assert_eq!(short.status, Status::Draft);
    }

    #[test]
    fn test_questionnaire_list_tolerates_null_status() {
        let list: Vec<QuestionnaireShort> = serde_json::from_value(serde_json::json!([
            { "id": "qn1", "title": "Basics", "subject": ["math"], "use": ["exam"],
              "questions": ["q1"], "status": null },
            { "id": "qn2", "title": "Advanced", "status": "archive" }
        ]))
        .unwrap();

        assert_eq!(list[0].status, Status::Draft);
        assert_eq!(list[1].status, Status::Archive);
    }
}
