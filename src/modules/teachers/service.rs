use tracing::instrument;

use crate::modules::users::model::Role;
use crate::store::Store;
use crate::utils::errors::AppError;
use crate::utils::pagination::{PaginationMeta, PaginationParams};

use super::model::{
    CreateTeacherDto, NewTeacherProfile, PaginatedTeachersResponse, TeacherProfile,
};

pub struct TeacherService;

impl TeacherService {
    /// Links a teacher profile to an existing account with the teacher role.
    #[instrument(skip(store, dto))]
    pub async fn create_teacher(
        store: &dyn Store,
        dto: CreateTeacherDto,
    ) -> Result<TeacherProfile, AppError> {
        let user = store
            .find_user(dto.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if user.role != Role::Teacher {
            return Err(AppError::validation("User does not have the teacher role"));
        }

        if store.find_teacher_by_user(user.id).await?.is_some() {
            return Err(AppError::validation("User already has a teacher profile"));
        }

        let profile = store
            .create_teacher(NewTeacherProfile {
                user_id: dto.user_id,
                employee_id: dto.employee_id,
                department: dto.department,
            })
            .await?;

        Ok(profile)
    }

    #[instrument(skip(store))]
    pub async fn list_teachers(
        store: &dyn Store,
        params: PaginationParams,
    ) -> Result<PaginatedTeachersResponse, AppError> {
        let limit = params.limit();
        let offset = params.offset();
        let (data, total) = store.list_teachers(limit, offset).await?;

        Ok(PaginatedTeachersResponse {
            data,
            meta: PaginationMeta::new(total, limit, offset),
        })
    }
}
