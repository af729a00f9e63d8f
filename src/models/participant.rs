// src/models/participant.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'session_participant' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Participant {
    pub participant_id: i64,
    pub session_id: i64,

    /// Absent for guests who joined with a nickname only.
    pub user_id: Option<i64>,

    /// Display name. Not unique within a session.
    pub nickname: String,

    pub joined_at: DateTime<Utc>,
    pub score: i32,
}

/// Represents the 'participant_answer' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ParticipantAnswer {
    pub participant_answer_id: i64,
    pub participant_id: i64,
    pub question_id: i64,
    /// `None` when the player ran out of time.
    pub chosen_answer_id: Option<i64>,
    pub is_correct: Option<bool>,
    pub points_awarded: Option<i32>,
    pub answered_at: DateTime<Utc>,
}

/// DTO for joining a session.
#[derive(Debug, Deserialize, Validate)]
pub struct JoinSessionRequest {
    pub session_id: i64,
    pub user_id: Option<i64>,
    #[validate(length(min = 1, max = 50, message = "Nickname must be between 1 and 50 characters."))]
    pub nickname: String,
}

/// DTO for recording one answer from a participant.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    pub participant_id: i64,
    pub question_id: i64,
    pub chosen_answer_id: Option<i64>,
    pub is_correct: Option<bool>,
    #[validate(range(min = 0))]
    pub points_awarded: Option<i32>,
}

/// DTO for overwriting a participant's score. The value replaces the stored one.
#[derive(Debug, Deserialize)]
pub struct ScoreUpdateRequest {
    pub score: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn guest_join_needs_no_user() {
        let req: JoinSessionRequest =
            serde_json::from_value(json!({ "session_id": 9, "nickname": "guest" })).unwrap();

        assert_eq!(req.user_id, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn blank_nickname_is_rejected() {
        let req: JoinSessionRequest =
            serde_json::from_value(json!({ "session_id": 9, "nickname": "" })).unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn unanswered_submission_is_allowed() {
        let req: SubmitAnswerRequest = serde_json::from_value(json!({
            "participant_id": 1,
            "question_id": 2
        }))
        .unwrap();

        assert_eq!(req.chosen_answer_id, None);
        assert_eq!(req.points_awarded, None);
        assert!(req.validate().is_ok());
    }
}
