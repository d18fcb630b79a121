//! Assignment models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::submissions::model::Submission;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub total_marks: i32,
    /// Teacher profile id of the creator.
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Assignment joined flat with its course.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssignmentDetail {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub total_marks: i32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub course_name: String,
    pub course_code: String,
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub total_marks: i32,
    pub created_by: Uuid,
}

fn default_total_marks() -> i32 {
    100
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAssignmentDto {
    pub course_id: Uuid,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    #[serde(default = "default_total_marks")]
    #[validate(range(min = 0))]
    pub total_marks: i32,
}

/// Assignment as a student sees it: joined with the course and with the
/// student's own submission, if one exists.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentAssignmentView {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub total_marks: i32,
    pub created_at: DateTime<Utc>,
    pub course_name: String,
    pub course_code: String,
    pub submission: Option<Submission>,
    /// `submitted` when any submission row exists, else `pending`.
    pub status: String,
}
