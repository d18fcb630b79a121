use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::model::Principal;
use crate::modules::courses::service::resolve_teacher;
use crate::modules::users::model::Role;
use crate::store::Store;
use crate::utils::errors::AppError;

use super::model::{
    GradeSubmissionDto, SubmitAssignmentDto, Submission, SubmissionDetail, SubmissionUpsert,
};

pub struct SubmissionService;

impl SubmissionService {
    /// Submits (or resubmits) the acting student's work. The student id is
    /// always the principal's own profile; submitting for someone else is
    /// not expressible.
    #[instrument(skip(store, dto))]
    pub async fn submit(
        store: &dyn Store,
        principal: &Principal,
        dto: SubmitAssignmentDto,
    ) -> Result<Submission, AppError> {
        let profile = store
            .find_student_by_user(principal.id)
            .await?
            .ok_or_else(|| AppError::profile_not_found("Student profile not found"))?;

        let assignment = store
            .find_assignment(dto.assignment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Assignment not found"))?;

        let course = store
            .find_course(assignment.course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        if course.class_section != profile.class_section {
            return Err(AppError::forbidden(
                "Assignment belongs to another class section",
            ));
        }

        let submission = store
            .upsert_submission(SubmissionUpsert {
                assignment_id: dto.assignment_id,
                student_id: profile.id,
                submission_text: dto.submission_text,
                file_url: dto.file_url,
                submitted_at: Utc::now(),
            })
            .await?;

        Ok(submission)
    }

    /// Submissions received for one assignment, readable only by the
    /// teacher who created it or an admin.
    #[instrument(skip(store))]
    pub async fn submissions_for_assignment(
        store: &dyn Store,
        principal: &Principal,
        assignment_id: Uuid,
    ) -> Result<Vec<SubmissionDetail>, AppError> {
        let assignment = store
            .find_assignment(assignment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Assignment not found"))?;

        if principal.role == Role::Teacher {
            let teacher = resolve_teacher(store, principal).await?;
            if assignment.created_by != teacher.id {
                return Err(AppError::forbidden(
                    "Assignment was created by another teacher",
                ));
            }
        }

        Ok(store.submissions_for_assignment(assignment_id).await?)
    }

    /// Grades a submission. Only the teacher who created the assignment may
    /// grade it; the awarded marks cannot exceed the assignment's total.
    /// `graded_at` is set on first grading and preserved on regrades.
    #[instrument(skip(store, dto))]
    pub async fn grade(
        store: &dyn Store,
        principal: &Principal,
        submission_id: Uuid,
        dto: GradeSubmissionDto,
    ) -> Result<Submission, AppError> {
        let submission = store
            .find_submission(submission_id)
            .await?
            .ok_or_else(|| AppError::not_found("Submission not found"))?;

        let assignment = store
            .find_assignment(submission.assignment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Assignment not found"))?;

        if principal.role == Role::Teacher {
            let teacher = resolve_teacher(store, principal).await?;
            if assignment.created_by != teacher.id {
                return Err(AppError::forbidden(
                    "Only the assignment's creator may grade submissions",
                ));
            }
        }

        if dto.marks_obtained > assignment.total_marks {
            return Err(AppError::validation(
                "marks_obtained cannot exceed the assignment's total marks",
            ));
        }

        store
            .grade_submission(submission_id, dto.marks_obtained, dto.feedback, Utc::now())
            .await?
            .ok_or_else(|| AppError::not_found("Submission not found"))
    }
}
