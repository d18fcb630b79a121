//! Student profile models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::users::model::UserStatus;

/// Student extension row linked one-to-one to a `User` with role `student`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub roll_number: String,
    pub class_section: String,
    pub address: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
}

/// Student profile joined flat with its user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub roll_number: String,
    pub class_section: String,
    pub address: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: UserStatus,
}

#[derive(Debug, Clone)]
pub struct NewStudentProfile {
    pub user_id: Uuid,
    pub roll_number: String,
    pub class_section: String,
}

/// Contact fields a student may edit on their own profile.
#[derive(Debug, Clone, Default)]
pub struct StudentContactPatch {
    pub address: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    pub user_id: Uuid,
    #[validate(length(min = 1))]
    pub roll_number: String,
    #[validate(length(min = 1))]
    pub class_section: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentContactDto {
    pub address: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<StudentDetail>,
    pub meta: crate::utils::pagination::PaginationMeta,
}
