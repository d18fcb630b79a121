//! Attendance models and DTOs.
//!
//! At most one record exists per `(student_id, course_id, date)`; writes
//! with the same key overwrite rather than duplicate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "attendance_status", rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Attendance {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    /// Teacher profile id of the marker.
    pub marked_by: Uuid,
    pub remarks: Option<String>,
}

/// Upsert payload keyed on `(student_id, course_id, date)`.
#[derive(Debug, Clone)]
pub struct AttendanceUpsert {
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub marked_by: Uuid,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct MarkAttendanceDto {
    pub student_id: Uuid,
    pub course_id: Uuid,
    /// Defaults to today when omitted.
    pub date: Option<NaiveDate>,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

/// Attendance row shaped for the student's own view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentAttendanceRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub course_name: String,
    pub course_code: String,
}

/// Attendance row shaped for a teacher's course register.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseAttendanceRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub roll_number: String,
    pub full_name: String,
}

/// Attendance row shaped for the admin report, joined both ways.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceReportRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub roll_number: String,
    pub full_name: String,
    pub course_name: String,
    pub course_code: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    /// Course filter; required for teachers, ignored for students.
    pub course_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
}
