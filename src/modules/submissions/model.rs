//! Submission models and DTOs.
//!
//! A submission moves `unsubmitted -> submitted -> graded`. The first
//! upsert on `(assignment_id, student_id)` creates it; later upserts
//! overwrite it; grading sets `graded_at` exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Submission {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub student_id: Uuid,
    pub submission_text: Option<String>,
    pub file_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub marks_obtained: Option<i32>,
    pub feedback: Option<String>,
    pub graded_at: Option<DateTime<Utc>>,
}

/// Submission joined flat with the submitting student.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SubmissionDetail {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub student_id: Uuid,
    pub submission_text: Option<String>,
    pub file_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub marks_obtained: Option<i32>,
    pub feedback: Option<String>,
    pub graded_at: Option<DateTime<Utc>>,
    pub roll_number: String,
    pub full_name: String,
}

/// Upsert payload keyed on `(assignment_id, student_id)`.
#[derive(Debug, Clone)]
pub struct SubmissionUpsert {
    pub assignment_id: Uuid,
    pub student_id: Uuid,
    pub submission_text: Option<String>,
    pub file_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SubmitAssignmentDto {
    pub assignment_id: Uuid,
    pub submission_text: Option<String>,
    pub file_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GradeSubmissionDto {
    #[validate(range(min = 0))]
    pub marks_obtained: i32,
    pub feedback: Option<String>,
}
