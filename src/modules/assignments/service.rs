use std::collections::HashMap;

use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::model::Principal;
use crate::modules::courses::service::resolve_teacher;
use crate::modules::submissions::model::Submission;
use crate::modules::users::model::Role;
use crate::store::Store;
use crate::utils::errors::AppError;

use super::model::{
    Assignment, AssignmentDetail, CreateAssignmentDto, NewAssignment, StudentAssignmentView,
};

/// What the listing endpoint returns depends on who asks.
pub enum AssignmentListing {
    /// Teacher or admin view, joined with course identities.
    Teacher(Vec<AssignmentDetail>),
    /// Student view, each row carrying the student's own submission.
    Student(Vec<StudentAssignmentView>),
}

pub struct AssignmentService;

impl AssignmentService {
    /// Creates an assignment for a course the acting teacher owns. Admins
    /// may create for any course with an assigned teacher.
    #[instrument(skip(store, dto))]
    pub async fn create_assignment(
        store: &dyn Store,
        principal: &Principal,
        dto: CreateAssignmentDto,
    ) -> Result<Assignment, AppError> {
        let course = store
            .find_course(dto.course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        let created_by = match principal.role {
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

        let assignment = store
            .create_assignment(NewAssignment {
                course_id: dto.course_id,
                title: dto.title,
                description: dto.description,
                due_date: dto.due_date,
                total_marks: dto.total_marks,
                created_by,
            })
            .await?;

        Ok(assignment)
    }

    /// Role-scoped assignment listing. A student's rows carry their own
    /// submission and a derived `pending`/`submitted` status; any
    /// submission row counts as submitted, even past the due date.
    #[instrument(skip(store))]
    pub async fn list_assignments(
        store: &dyn Store,
        principal: &Principal,
    ) -> Result<AssignmentListing, AppError> {
        match principal.role {
            Role::Admin => Ok(AssignmentListing::Teacher(store.list_assignments().await?)),
            Role::Teacher => {
                let teacher = resolve_teacher(store, principal).await?;
                Ok(AssignmentListing::Teacher(
                    store.assignments_by_creator(teacher.id).await?,
                ))
            }
            Role::Student => {
                let profile = store
                    .find_student_by_user(principal.id)
                    .await?
                    .ok_or_else(|| AppError::profile_not_found("Student profile not found"))?;

                let assignments = store.assignments_in_section(&profile.class_section).await?;
                let submissions: HashMap<Uuid, Submission> = store
                    .submissions_by_student(profile.id)
                    .await?
                    .into_iter()
                    .map(|s| (s.assignment_id, s))
                    .collect();

                let views = assignments
                    .into_iter()
                    .map(|a| {
                        let submission = submissions.get(&a.id).cloned();
                        let status = if submission.is_some() {
                            "submitted"
                        } else {
                            "pending"
                        };
                        StudentAssignmentView {
                            id: a.id,
                            course_id: a.course_id,
                            title: a.title,
                            description: a.description,
                            due_date: a.due_date,
                            total_marks: a.total_marks,
                            created_at: a.created_at,
                            course_name: a.course_name,
                            course_code: a.course_code,
                            submission,
                            status: status.to_string(),
                        }
                    })
                    .collect();

                Ok(AssignmentListing::Student(views))
            }
        }
    }
}
