use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::model::Principal;
use crate::modules::students::model::StudentDetail;
use crate::modules::teachers::model::TeacherProfile;
use crate::modules::users::model::Role;
use crate::store::Store;
use crate::utils::errors::AppError;

use super::model::{Course, CourseDetail, CreateCourseDto, NewCourse};

pub struct CourseService;

impl CourseService {
    #[instrument(skip(store, dto))]
    pub async fn create_course(store: &dyn Store, dto: CreateCourseDto) -> Result<Course, AppError> {
        if let Some(teacher_id) = dto.teacher_id
            && store.find_teacher(teacher_id).await?.is_none()
        {
            return Err(AppError::not_found("Teacher not found"));
        }

        let course = store
            .create_course(NewCourse {
                course_code: dto.course_code,
                course_name: dto.course_name,
                class_section: dto.class_section,
                credits: dto.credits,
                teacher_id: dto.teacher_id,
            })
            .await?;

        Ok(course)
    }

    /// Role-scoped course listing. Admins see everything, teachers see the
    /// courses they own, students see the courses of their section.
    #[instrument(skip(store))]
    pub async fn list_courses(
        store: &dyn Store,
        principal: &Principal,
    ) -> Result<Vec<CourseDetail>, AppError> {
        match principal.role {
            Role::Admin => Ok(store.list_courses().await?),
            Role::Teacher => {
                let teacher = resolve_teacher(store, principal).await?;
                Ok(store.courses_by_teacher(teacher.id).await?)
            }
            Role::Student => {
                let profile = store
                    .find_student_by_user(principal.id)
                    .await?
                    .ok_or_else(|| AppError::profile_not_found("Student profile not found"))?;
                Ok(store.courses_in_section(&profile.class_section).await?)
            }
        }
    }

    /// The roster of a course's section. Teachers may only read rosters of
    /// courses they own; admins may read any.
    #[instrument(skip(store))]
    pub async fn course_students(
        store: &dyn Store,
        principal: &Principal,
        course_id: Uuid,
    ) -> Result<Vec<StudentDetail>, AppError> {
        let course = store
            .find_course(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found"))?;

        if principal.role == Role::Teacher {
            let teacher = resolve_teacher(store, principal).await?;
            if course.teacher_id != Some(teacher.id) {
                return Err(AppError::forbidden("Course is assigned to another teacher"));
            }
        }

        Ok(store.students_in_section(&course.class_section).await?)
    }
}

pub(crate) async fn resolve_teacher(
    store: &dyn Store,
    principal: &Principal,
) -> Result<TeacherProfile, AppError> {
    store
        .find_teacher_by_user(principal.id)
        .await?
        .ok_or_else(|| AppError::profile_not_found("Teacher profile not found"))
}
