//! Feedback models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Feedback {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Option<Uuid>,
    pub category: String,
    pub message: String,
    pub rating: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Feedback joined flat with the submitting student.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FeedbackDetail {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Option<Uuid>,
    pub category: String,
    pub message: String,
    pub rating: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub roll_number: String,
    pub full_name: String,
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub student_id: Uuid,
    pub course_id: Option<Uuid>,
    pub category: String,
    pub message: String,
    pub rating: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubmitFeedbackDto {
    pub course_id: Option<Uuid>,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(length(min = 1))]
    pub message: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
}
