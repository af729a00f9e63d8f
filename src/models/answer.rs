// src/models/answer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::question::default_sort_order;

/// Represents the 'quiz_answer' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Answer {
    pub answer_id: i64,
    pub question_id: i64,
    pub answer_text: String,
    pub is_correct: bool,
    pub sort_order: Option<i32>,
    pub media_id: Option<i64>,
}

/// DTO for creating an answer option.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAnswerRequest {
    pub question_id: i64,
    #[validate(length(min = 1, max = 500))]
    pub answer_text: String,
    pub is_correct: bool,
    #[serde(default = "default_sort_order")]
    pub sort_order: i32,
    pub media_id: Option<i64>,
}

/// DTO for replacing an answer option.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAnswerRequest {
    pub question_id: i64,
    #[validate(length(min = 1, max = 500))]
    pub answer_text: String,
    pub is_correct: bool,
    pub sort_order: i32,
    pub media_id: Option<i64>,
}
