//! Per-role dashboard payloads. All values here are derived on read,
//! never stored.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::marks::model::Mark;

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminDashboard {
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_courses: i64,
    pub today_attendance: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherDashboard {
    pub teacher_id: Uuid,
    pub my_courses: i64,
    pub today_classes: i64,
    pub upcoming_assignments: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDashboard {
    pub student_id: Uuid,
    /// Present over total, two decimal places; 0 when no records exist.
    pub attendance_percentage: f64,
    pub total_classes: i64,
    pub present_classes: i64,
    pub pending_assignments: i64,
    pub recent_marks: Vec<Mark>,
}
