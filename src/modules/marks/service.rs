use tracing::instrument;

use crate::modules::auth::model::Principal;
use crate::modules::courses::service::resolve_teacher;
use crate::modules::users::model::Role;
use crate::store::Store;
use crate::utils::errors::AppError;

use super::model::{
    CourseMarkRow, EnterMarkDto, Mark, MarkReportRow, MarksQuery, NewMark, StudentMarkView,
};

const REPORT_LIMIT: i64 = 100;

/// What the listing endpoint returns depends on who asks.
pub enum MarkListing {
    /// Recent marks across the school, for admins.
    Report(Vec<MarkReportRow>),
    /// One course's marks, for its teacher.
    Course(Vec<CourseMarkRow>),
    /// The student's own marks with derived percentages.
    Student(Vec<StudentMarkView>),
}

pub struct MarkService;

impl MarkService {
    /// Records an exam mark. Teachers may only enter marks for courses they
    /// own; the awarded marks cannot exceed the exam's total.
    #[instrument(skip(store, dto))]
    pub async fn enter_mark(
        store: &dyn Store,
        principal: &Principal,
        dto: EnterMarkDto,
    ) -> Result<Mark, AppError> {
        if dto.total_marks <= 0 {
            return Err(AppError::validation("total_marks must be positive"));
        }
        if dto.marks_obtained > dto.total_marks {
            return Err(AppError::validation(
                "marks_obtained cannot exceed total_marks",
            ));
        }

        let course = store
            .find_course(dto.course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        let entered_by = match principal.role {
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

        let mark = store
            .insert_mark(NewMark {
                student_id: dto.student_id,
                course_id: dto.course_id,
                exam_type: dto.exam_type,
                marks_obtained: dto.marks_obtained,
                total_marks: dto.total_marks,
                exam_date: dto.exam_date,
                entered_by,
                remarks: dto.remarks,
            })
            .await?;

        Ok(mark)
    }

    /// Role-scoped mark listing. Students always get their own rows and
    /// any `course_id` filter from them is ignored.
    #[instrument(skip(store))]
    pub async fn list_marks(
        store: &dyn Store,
        principal: &Principal,
        query: MarksQuery,
    ) -> Result<MarkListing, AppError> {
        match principal.role {
            Role::Admin => Ok(MarkListing::Report(store.marks_report(REPORT_LIMIT).await?)),
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
                Ok(MarkListing::Course(store.marks_for_course(course_id).await?))
            }
            Role::Student => {
                let profile = store
                    .find_student_by_user(principal.id)
                    .await?
                    .ok_or_else(|| AppError::profile_not_found("Student profile not found"))?;
                let views = store
                    .marks_for_student(profile.id)
                    .await?
                    .into_iter()
                    .map(StudentMarkView::from_mark)
                    .collect();
                Ok(MarkListing::Student(views))
            }
        }
    }
}
