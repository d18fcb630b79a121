use chrono::Utc;
use tracing::instrument;

use crate::modules::auth::model::Principal;
use crate::modules::courses::service::resolve_teacher;
use crate::modules::users::model::Role;
use crate::store::Store;
use crate::utils::errors::AppError;

use super::model::{
    Attendance, AttendanceQuery, AttendanceUpsert, CourseAttendanceRow, MarkAttendanceDto,
    StudentAttendanceRow,
};

/// What the listing endpoint returns depends on who asks.
pub enum AttendanceListing {
    /// The student's own records, joined with course names.
    Student(Vec<StudentAttendanceRow>),
    /// A course register, joined with student identities.
    Course(Vec<CourseAttendanceRow>),
}

pub struct AttendanceService;

impl AttendanceService {
    /// Marks attendance for one student in one course on one date. Writing
    /// the same key again overwrites, except that a record marked by a
    /// different teacher is only overwritable by an admin.
    #[instrument(skip(store, dto))]
    pub async fn mark_attendance(
        store: &dyn Store,
        principal: &Principal,
        dto: MarkAttendanceDto,
    ) -> Result<Attendance, AppError> {
        let course = store
            .find_course(dto.course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        let marked_by = match principal.role {
            Role::Admin => course
                .teacher_id
                .ok_or_else(|| AppError::validation("Course has no assigned teacher"))?,
            _ => {
                let teacher = resolve_teacher(store, principal).await?;
                if course.teacher_id != Some(teacher.id) {
                    return Err(AppError::forbidden("Course is assigned to another teacher"));
                }
                teacher.id
            }
        };

        let student = store
            .find_student(dto.student_id)
            .await?
            .ok_or_else(|| AppError::not_found("Student not found"))?;

        if student.class_section != course.class_section {
            return Err(AppError::validation(
                "Student is not in the course's class section",
            ));
        }

        let date = dto.date.unwrap_or_else(|| Utc::now().date_naive());

        if principal.role != Role::Admin
            && let Some(existing) = store
                .find_attendance(dto.student_id, dto.course_id, date)
                .await?
            && existing.marked_by != marked_by
        {
            return Err(AppError::conflict(
                "Attendance already marked by another teacher",
            ));
        }

        let record = store
            .upsert_attendance(AttendanceUpsert {
                student_id: dto.student_id,
                course_id: dto.course_id,
                date,
                status: dto.status,
                marked_by,
                remarks: dto.remarks,
            })
            .await?;

        Ok(record)
    }

    /// Role-scoped attendance listing. Students always get their own
    /// records and any `course_id` filter from them is ignored. Teachers
    /// and admins read per-course registers.
    #[instrument(skip(store))]
    pub async fn list_attendance(
        store: &dyn Store,
        principal: &Principal,
        query: AttendanceQuery,
    ) -> Result<AttendanceListing, AppError> {
        match principal.role {
            Role::Student => {
                let profile = store
                    .find_student_by_user(principal.id)
                    .await?
                    .ok_or_else(|| AppError::profile_not_found("Student profile not found"))?;
                let rows = store.attendance_for_student(profile.id).await?;
                Ok(AttendanceListing::Student(rows))
            }
            Role::Teacher => {
                let course_id = query
                    .course_id
                    .ok_or_else(|| AppError::validation("course_id is required"))?;
                let teacher = resolve_teacher(store, principal).await?;
                let course = store
                    .find_course(course_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Course not found"))?;
                if course.teacher_id != Some(teacher.id) {
                    return Err(AppError::forbidden("Course is assigned to another teacher"));
                }
                let rows = store.attendance_for_course(course_id, query.date).await?;
                Ok(AttendanceListing::Course(rows))
            }
            Role::Admin => {
                let course_id = query
                    .course_id
                    .ok_or_else(|| AppError::validation("course_id is required"))?;
                let rows = store.attendance_for_course(course_id, query.date).await?;
                Ok(AttendanceListing::Course(rows))
            }
        }
    }
}
