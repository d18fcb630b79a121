use tracing::instrument;

use crate::modules::auth::model::Principal;
use crate::modules::users::model::Role;
use crate::store::Store;
use crate::utils::errors::AppError;
use crate::utils::pagination::{PaginationMeta, PaginationParams};

use super::model::{
    CreateStudentDto, NewStudentProfile, PaginatedStudentsResponse, StudentContactPatch,
    StudentDetail, StudentProfile, UpdateStudentContactDto,
};

pub struct StudentService;

impl StudentService {
    /// Links a student profile to an existing account with the student role.
    #[instrument(skip(store, dto))]
    pub async fn create_student(
        store: &dyn Store,
        dto: CreateStudentDto,
    ) -> Result<StudentProfile, AppError> {
        let user = store
            .find_user(dto.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if user.role != Role::Student {
            return Err(AppError::validation("User does not have the student role"));
        }

        if store.find_student_by_user(user.id).await?.is_some() {
            return Err(AppError::validation("User already has a student profile"));
        }

        let profile = store
            .create_student(NewStudentProfile {
                user_id: dto.user_id,
                roll_number: dto.roll_number,
                class_section: dto.class_section,
            })
            .await?;

        Ok(profile)
    }

    #[instrument(skip(store))]
    pub async fn list_students(
        store: &dyn Store,
        params: PaginationParams,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        let limit = params.limit();
        let offset = params.offset();
        let (data, total) = store.list_students(limit, offset).await?;

        Ok(PaginatedStudentsResponse {
            data,
            meta: PaginationMeta::new(total, limit, offset),
        })
    }

    /// The acting student's own profile, resolved from the principal.
    #[instrument(skip(store))]
    pub async fn my_profile(
        store: &dyn Store,
        principal: &Principal,
    ) -> Result<StudentDetail, AppError> {
        store
            .student_detail_by_user(principal.id)
            .await?
            .ok_or_else(|| AppError::profile_not_found("Student profile not found"))
    }

    /// Updates contact fields on the acting student's own profile. Roll
    /// number and section are admin-managed and not touchable here.
    #[instrument(skip(store, dto))]
    pub async fn update_my_contact(
        store: &dyn Store,
        principal: &Principal,
        dto: UpdateStudentContactDto,
    ) -> Result<StudentProfile, AppError> {
        let profile = store
            .find_student_by_user(principal.id)
            .await?
            .ok_or_else(|| AppError::profile_not_found("Student profile not found"))?;

        store
            .update_student_contact(
                profile.id,
                StudentContactPatch {
                    address: dto.address,
                    guardian_name: dto.guardian_name,
                    guardian_phone: dto.guardian_phone,
                },
            )
            .await?
            .ok_or_else(|| AppError::profile_not_found("Student profile not found"))
    }
}
