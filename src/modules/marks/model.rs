//! Exam mark models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Mark {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub exam_type: String,
    pub marks_obtained: i32,
    pub total_marks: i32,
    pub exam_date: NaiveDate,
    /// Teacher profile id of the enterer.
    pub entered_by: Uuid,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMark {
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub exam_type: String,
    pub marks_obtained: i32,
    pub total_marks: i32,
    pub exam_date: NaiveDate,
    pub entered_by: Uuid,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EnterMarkDto {
    pub student_id: Uuid,
    pub course_id: Uuid,
    #[validate(length(min = 1))]
    pub exam_type: String,
    #[validate(range(min = 0))]
    pub marks_obtained: i32,
    #[validate(range(min = 0))]
    pub total_marks: i32,
    pub exam_date: NaiveDate,
    pub remarks: Option<String>,
}

/// Mark joined flat with its course, for the student's own view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MarkWithCourse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub exam_type: String,
    pub marks_obtained: i32,
    pub total_marks: i32,
    pub exam_date: NaiveDate,
    pub remarks: Option<String>,
    pub course_name: String,
    pub course_code: String,
}

/// Student-facing mark row with the derived percentage attached.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentMarkView {
    pub id: Uuid,
    pub course_id: Uuid,
    pub exam_type: String,
    pub marks_obtained: i32,
    pub total_marks: i32,
    pub exam_date: NaiveDate,
    pub remarks: Option<String>,
    pub course_name: String,
    pub course_code: String,
    /// `marks_obtained / total_marks * 100`, two decimal places.
    pub percentage: f64,
}

impl StudentMarkView {
    pub fn from_mark(mark: MarkWithCourse) -> Self {
        let percentage =
            crate::utils::stats::marks_percentage(mark.marks_obtained, mark.total_marks);
        Self {
            id: mark.id,
            course_id: mark.course_id,
            exam_type: mark.exam_type,
            marks_obtained: mark.marks_obtained,
            total_marks: mark.total_marks,
            exam_date: mark.exam_date,
            remarks: mark.remarks,
            course_name: mark.course_name,
            course_code: mark.course_code,
            percentage,
        }
    }
}

/// Mark joined flat with the student, for a teacher's course view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseMarkRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub exam_type: String,
    pub marks_obtained: i32,
    pub total_marks: i32,
    pub exam_date: NaiveDate,
    pub remarks: Option<String>,
    pub roll_number: String,
    pub full_name: String,
}

/// Mark joined both ways for the admin report.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MarkReportRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub exam_type: String,
    pub marks_obtained: i32,
    pub total_marks: i32,
    pub exam_date: NaiveDate,
    pub roll_number: String,
    pub full_name: String,
    pub course_name: String,
    pub course_code: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MarksQuery {
    /// Course filter; required for teachers, ignored for students.
    pub course_id: Option<Uuid>,
}
