// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Creation method used when none is given: 1 = built by hand.
pub const MANUAL_CREATION_METHOD: i64 = 1;

/// Represents the 'quiz' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    pub quiz_id: i64,
    pub name: String,
    pub creation_method_id: Option<i64>,
    /// Author of the quiz; cleared if the user is deleted.
    pub creator_id: Option<i64>,
    pub media_id: Option<i64>,
}

fn default_creation_method() -> Option<i64> {
    Some(MANUAL_CREATION_METHOD)
}

/// DTO for creating a quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 255, message = "Quiz name must be between 1 and 255 characters."))]
    pub name: String,
    #[serde(default = "default_creation_method")]
    pub creation_method_id: Option<i64>,
    pub creator_id: Option<i64>,
    pub media_id: Option<i64>,
}

/// DTO for replacing a quiz. Nullable columns are written as given, including `null`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuizRequest {
    #[validate(length(min = 1, max = 255, message = "Quiz name must be between 1 and 255 characters."))]
    pub name: String,
    pub creation_method_id: Option<i64>,
    pub creator_id: Option<i64>,
    pub media_id: Option<i64>,
}

/// DTO for a partial quiz update.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PatchQuizRequest {
    #[validate(length(min = 1, max = 255, message = "Quiz name must be between 1 and 255 characters."))]
    pub name: Option<String>,
    pub creation_method_id: Option<i64>,
    pub creator_id: Option<i64>,
    pub media_id: Option<i64>,
}

impl PatchQuizRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.creation_method_id.is_none()
            && self.creator_id.is_none()
            && self.media_id.is_none()
    }
}

/// Query parameters for listing quizzes.
#[derive(Debug, Deserialize)]
pub struct ListQuizzesParams {
    pub creator_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn creation_method_defaults_to_manual() {
        let req: CreateQuizRequest =
            serde_json::from_value(json!({ "name": "Capitals", "creator_id": 3 })).unwrap();

        assert_eq!(req.creation_method_id, Some(MANUAL_CREATION_METHOD));
        assert_eq!(req.creator_id, Some(3));
        assert_eq!(req.media_id, None);
    }

    #[test]
    fn explicit_null_creation_method_is_kept() {
        let req: CreateQuizRequest =
            serde_json::from_value(json!({ "name": "Capitals", "creation_method_id": null })).unwrap();

        assert_eq!(req.creation_method_id, None);
    }

    #[test]
    fn empty_name_fails_validation() {
        let req: CreateQuizRequest = serde_json::from_value(json!({ "name": "" })).unwrap();
        assert!(req.validate().is_err());
    }
}
