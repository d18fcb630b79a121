//! Teacher profile models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::users::model::UserStatus;

/// Teacher extension row linked one-to-one to a `User` with role `teacher`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeacherProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub employee_id: String,
    pub department: Option<String>,
}

/// Teacher profile joined flat with its user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeacherDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub employee_id: String,
    pub department: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: UserStatus,
}

#[derive(Debug, Clone)]
pub struct NewTeacherProfile {
    pub user_id: Uuid,
    pub employee_id: String,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTeacherDto {
    pub user_id: Uuid,
    #[validate(length(min = 1))]
    pub employee_id: String,
    pub department: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedTeachersResponse {
    pub data: Vec<TeacherDetail>,
    pub meta: crate::utils::pagination::PaginationMeta,
}
