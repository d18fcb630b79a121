//! Course models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub course_code: String,
    pub course_name: String,
    pub class_section: String,
    pub credits: i32,
    /// Owning teacher profile id; null while unassigned.
    pub teacher_id: Option<Uuid>,
}

/// Course joined flat with the assigned teacher, if any.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseDetail {
    pub id: Uuid,
    pub course_code: String,
    pub course_name: String,
    pub class_section: String,
    pub credits: i32,
    pub teacher_id: Option<Uuid>,
    pub teacher_name: Option<String>,
    pub teacher_employee_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub course_code: String,
    pub course_name: String,
    pub class_section: String,
    pub credits: i32,
    pub teacher_id: Option<Uuid>,
}

fn default_credits() -> i32 {
    3
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1))]
    pub course_code: String,
    #[validate(length(min = 1))]
    pub course_name: String,
    #[validate(length(min = 1))]
    pub class_section: String,
    #[serde(default = "default_credits")]
    #[validate(range(min = 0))]
    pub credits: i32,
    pub teacher_id: Option<Uuid>,
}
