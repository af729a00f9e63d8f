// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'quiz_question' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub question_id: i64,

    pub quiz_id: i64,

    pub question_text: String,

    /// e.g. "multiple_choice" or "true_false".
    pub question_type: String,

    /// Seconds a player has to answer.
    pub time_limit: i32,

    /// Points awarded for a correct answer.
    pub points: i32,

    /// Display position within the quiz. Not unique; NULL sorts last.
    pub sort_order: Option<i32>,

    pub media_id: Option<i64>,
}

fn default_question_type() -> String {
    "multiple_choice".to_string()
}

fn default_time_limit() -> i32 {
    30
}

fn default_points() -> i32 {
    1000
}

pub(crate) fn default_sort_order() -> i32 {
    1
}

/// DTO for creating a new question.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    pub quiz_id: i64,
    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,
    #[serde(default = "default_question_type")]
    #[validate(length(min = 1, max = 50))]
    pub question_type: String,
    #[serde(default = "default_time_limit")]
    #[validate(range(min = 1, message = "Time limit must be at least one second."))]
    pub time_limit: i32,
    #[serde(default = "default_points")]
    #[validate(range(min = 0))]
    pub points: i32,
    #[serde(default = "default_sort_order")]
    pub sort_order: i32,
    pub media_id: Option<i64>,
}

/// DTO for replacing a question.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    pub quiz_id: i64,
    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,
    #[validate(length(min = 1, max = 50))]
    pub question_type: String,
    #[validate(range(min = 1, message = "Time limit must be at least one second."))]
    pub time_limit: i32,
    #[validate(range(min = 0))]
    pub points: i32,
    pub sort_order: i32,
    pub media_id: Option<i64>,
}

/// DTO for a partial question update.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PatchQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question_text: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub question_type: Option<String>,
    #[validate(range(min = 1, message = "Time limit must be at least one second."))]
    pub time_limit: Option<i32>,
    #[validate(range(min = 0))]
    pub points: Option<i32>,
    pub sort_order: Option<i32>,
    pub media_id: Option<i64>,
}

impl PatchQuestionRequest {
    pub fn is_empty(&self) -> bool {
        self.question_text.is_none()
            && self.question_type.is_none()
            && self.time_limit.is_none()
            && self.points.is_none()
            && self.sort_order.is_none()
            && self.media_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_applied() {
        let req: CreateQuestionRequest = serde_json::from_value(json!({
            "quiz_id": 1,
            "question_text": "Capital of Sweden?"
        }))
        .unwrap();

        assert_eq!(req.question_type, "multiple_choice");
        assert_eq!(req.time_limit, 30);
        assert_eq!(req.points, 1000);
        assert_eq!(req.sort_order, 1);
        assert_eq!(req.media_id, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn zero_time_limit_is_rejected() {
        let req: CreateQuestionRequest = serde_json::from_value(json!({
            "quiz_id": 1,
            "question_text": "Q",
            "time_limit": 0
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn patch_with_only_sort_order_is_not_empty() {
        let patch: PatchQuestionRequest =
            serde_json::from_value(json!({ "sort_order": 4 })).unwrap();
        assert!(!patch.is_empty());
        assert!(PatchQuestionRequest::default().is_empty());
    }
}
